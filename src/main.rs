use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use scholia::application::services::{PromptComposer, RequestOrchestrator};
use scholia::infrastructure::llm::create_chat_completions_gateway;
use scholia::infrastructure::observability::{TracingConfig, init_tracing};
use scholia::infrastructure::text_processing::PdfAdapter;
use scholia::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("invalid configuration")?;

    init_tracing(
        &TracingConfig::new(
            environment.as_str(),
            settings.logging.enable_json,
            &settings.logging.level,
        ),
        settings.server.port,
    )?;

    let gateway = Arc::new(
        create_chat_completions_gateway(&settings.llm).context("failed to build model gateway")?,
    );
    tracing::info!(
        provider = ?settings.llm.provider,
        model = %settings.llm.chat_model,
        endpoint = %gateway.endpoint(),
        "Model gateway ready"
    );

    let orchestrator = Arc::new(RequestOrchestrator::new(
        gateway,
        Arc::new(PdfAdapter::new()),
        PromptComposer::new(settings.prompts.composition_settings()),
        settings.requests.orchestrator_settings(),
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let router = create_router(AppState {
        orchestrator,
        settings,
    });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
