use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ModelGateway, ModelGatewayError, TokenStream};
use crate::domain::{ChatMessage, ComposedRequest};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::sse_decoder::SseDecoder;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const AZURE_API_VERSION: &str = "2024-06-01";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionsGateway {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsGateway {
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn endpoint(&self) -> String {
        match self.provider {
            LlmProvider::Azure => format!(
                "{}/chat/completions?api-version={}",
                self.base_url, AZURE_API_VERSION
            ),
            _ => format!("{}/chat/completions", self.base_url),
        }
    }

    fn request_body(&self, request: &ComposedRequest, stream: bool) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages(),
            max_tokens: request.sampling.max_tokens,
            temperature: request.sampling.temperature,
            top_p: request.sampling.top_p,
            stream: stream.then_some(true),
        }
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            LlmProvider::Azure => request.header("api-key", &self.api_key),
            LlmProvider::LmStudio if self.api_key.is_empty() => request,
            _ => request.header("Authorization", format!("Bearer {}", self.api_key)),
        }
    }

    async fn send(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, ModelGatewayError> {
        let request = self.client.post(self.endpoint()).json(body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| ModelGatewayError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelGatewayError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelGatewayError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl ModelGateway for ChatCompletionsGateway {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, provider = ?self.provider))]
    async fn generate(&self, request: &ComposedRequest) -> Result<String, ModelGatewayError> {
        let body = self.request_body(request, false);
        let response = self.send(&body).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelGatewayError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| ModelGatewayError::InvalidResponse("empty choices".to_string()))
    }

    #[tracing::instrument(skip(self, request), fields(model = %self.model, provider = ?self.provider))]
    async fn generate_stream(
        &self,
        request: &ComposedRequest,
    ) -> Result<TokenStream, ModelGatewayError> {
        let body = self.request_body(request, true);
        let response = self.send(&body).await?;
        let mut bytes = Box::pin(response.bytes_stream());

        let token_stream = async_stream::stream! {
            let mut decoder = SseDecoder::default();

            loop {
                let (payloads, upstream_closed) = match bytes.next().await {
                    Some(Ok(chunk)) => (decoder.push(&chunk), false),
                    Some(Err(e)) => {
                        yield Err(ModelGatewayError::ApiRequestFailed(e.to_string()));
                        return;
                    }
                    None => (decoder.finish(), true),
                };

                for data in payloads {
                    if data == "[DONE]" {
                        return;
                    }
                    match serde_json::from_str::<ChatCompletionChunk>(&data) {
                        Ok(parsed) => {
                            let content = parsed
                                .choices
                                .into_iter()
                                .next()
                                .and_then(|choice| choice.delta.content);
                            if let Some(content) = content {
                                yield Ok(content);
                            }
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "Skipping unparsable stream chunk");
                        }
                    }
                }

                if upstream_closed {
                    return;
                }
            }
        };

        Ok(Box::pin(token_stream))
    }
}

/// Builds a gateway from settings, resolving the provider's base URL.
pub fn create_chat_completions_gateway(
    settings: &LlmSettings,
) -> Result<ChatCompletionsGateway, ModelGatewayError> {
    let base_url = match settings.provider {
        LlmProvider::OpenAi => settings
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        LlmProvider::HuggingFace => format!(
            "https://api-inference.huggingface.co/models/{}/v1",
            settings.chat_model
        ),
        LlmProvider::LmStudio => settings.base_url.clone().ok_or_else(|| {
            ModelGatewayError::Misconfigured("base_url required for lmstudio provider".to_string())
        })?,
        LlmProvider::Azure => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                ModelGatewayError::Misconfigured(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            format!(
                "{}/openai/deployments/{}",
                endpoint.trim_end_matches('/'),
                settings.chat_model
            )
        }
    };

    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(|e| ModelGatewayError::Misconfigured(e.to_string()))?;

    Ok(ChatCompletionsGateway {
        client,
        provider: settings.provider,
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
    })
}
