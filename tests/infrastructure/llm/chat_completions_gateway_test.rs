use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use futures::stream::StreamExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use scholia::application::ports::{ModelGateway, ModelGatewayError};
use scholia::domain::{ComposedRequest, ConversationTurn, SamplingParams};
use scholia::infrastructure::llm::create_chat_completions_gateway;
use scholia::presentation::config::{LlmProvider, LlmSettings};

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }

    let user = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_string();

    if user == "rate-limit me" {
        return (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response();
    }

    if body["stream"] == json!(true) && user == "cut me off" {
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"content\":\"Par\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"tial\"}}]}",
        );
        return ([("content-type", "text/event-stream")], sse).into_response();
    }

    if body["stream"] == json!(true) {
        let sse = concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n",
            ": keep-alive\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n",
            "data: [DONE]\n\n",
        );
        return ([("content-type", "text/event-stream")], sse).into_response();
    }

    let echo = format!(
        "{}|{}|{}|{}",
        body["messages"].as_array().map(|m| m.len()).unwrap_or(0),
        body["max_tokens"],
        body["top_p"],
        user
    );
    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": echo}}]
    }))
    .into_response()
}

async fn spawn_fake_provider() -> String {
    let app = Router::new().route("/v1/chat/completions", post(chat_completions));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn settings(base_url: String) -> LlmSettings {
    LlmSettings {
        provider: LlmProvider::OpenAi,
        api_key: "test-key".to_string(),
        base_url: Some(base_url),
        azure_endpoint: None,
        chat_model: "test-model".to_string(),
    }
}

fn request(user_message: &str) -> ComposedRequest {
    ComposedRequest {
        system_message: "You are a tutor.".to_string(),
        user_message: user_message.to_string(),
        sampling: SamplingParams {
            max_tokens: 128,
            temperature: 0.5,
            top_p: 0.9,
        },
        history: vec![ConversationTurn::new("earlier", "reply")],
    }
}

#[tokio::test]
async fn given_batch_request_when_generating_then_sends_messages_and_sampling() {
    let base_url = spawn_fake_provider().await;
    let gateway = create_chat_completions_gateway(&settings(base_url)).unwrap();

    let answer = gateway.generate(&request("What is osmosis?")).await.unwrap();

    assert_eq!(answer, "4|128|0.9|What is osmosis?");
}

#[tokio::test]
async fn given_stream_request_when_generating_then_yields_content_deltas() {
    let base_url = spawn_fake_provider().await;
    let gateway = create_chat_completions_gateway(&settings(base_url)).unwrap();

    let deltas: Vec<String> = gateway
        .generate_stream(&request("Greet me"))
        .await
        .unwrap()
        .map(|delta| delta.unwrap())
        .collect()
        .await;

    assert_eq!(deltas, vec!["Hel".to_string(), "lo".to_string()]);
}

#[tokio::test]
async fn given_upstream_closes_without_newline_when_streaming_then_last_delta_is_kept() {
    let base_url = spawn_fake_provider().await;
    let gateway = create_chat_completions_gateway(&settings(base_url)).unwrap();

    let deltas: Vec<String> = gateway
        .generate_stream(&request("cut me off"))
        .await
        .unwrap()
        .map(|delta| delta.unwrap())
        .collect()
        .await;

    assert_eq!(deltas, vec!["Par".to_string(), "tial".to_string()]);
}

#[tokio::test]
async fn given_provider_throttles_when_generating_then_returns_rate_limited() {
    let base_url = spawn_fake_provider().await;
    let gateway = create_chat_completions_gateway(&settings(base_url)).unwrap();

    let result = gateway.generate(&request("rate-limit me")).await;

    assert!(matches!(result, Err(ModelGatewayError::RateLimited)));
}

#[tokio::test]
async fn given_wrong_key_when_generating_then_returns_api_failure() {
    let base_url = spawn_fake_provider().await;
    let mut settings = settings(base_url);
    settings.api_key = "wrong".to_string();
    let gateway = create_chat_completions_gateway(&settings).unwrap();

    let result = gateway.generate(&request("hi")).await;

    assert!(matches!(
        result,
        Err(ModelGatewayError::ApiRequestFailed(msg)) if msg.contains("401")
    ));
}

#[test]
fn given_lmstudio_without_base_url_when_creating_then_is_misconfigured() {
    let settings = LlmSettings {
        provider: LlmProvider::LmStudio,
        base_url: None,
        ..LlmSettings::default()
    };

    let result = create_chat_completions_gateway(&settings);

    assert!(matches!(result, Err(ModelGatewayError::Misconfigured(_))));
}

#[test]
fn given_huggingface_provider_when_creating_then_targets_model_route() {
    let settings = LlmSettings::default();

    let gateway = create_chat_completions_gateway(&settings).unwrap();

    assert_eq!(
        gateway.endpoint(),
        "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta/v1/chat/completions"
    );
}

#[test]
fn given_azure_provider_when_creating_then_uses_deployment_route() {
    let settings = LlmSettings {
        provider: LlmProvider::Azure,
        azure_endpoint: Some("https://example.openai.azure.com/".to_string()),
        chat_model: "gpt-4o-mini".to_string(),
        ..LlmSettings::default()
    };

    let gateway = create_chat_completions_gateway(&settings).unwrap();

    assert!(gateway.endpoint().starts_with(
        "https://example.openai.azure.com/openai/deployments/gpt-4o-mini/chat/completions?api-version="
    ));
}
