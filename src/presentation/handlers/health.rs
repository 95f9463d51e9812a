use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{ModelGateway, PdfTextSource};
use crate::domain::Mode;
use crate::presentation::config::LlmProvider;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: LlmProvider,
    pub model: String,
    pub modes: [Mode; 2],
}

/// Liveness check; reports the configured model without contacting it.
pub async fn health_handler<G, P>(State(state): State<AppState<G, P>>) -> impl IntoResponse
where
    G: ModelGateway,
    P: PdfTextSource,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            provider: state.settings.llm.provider,
            model: state.settings.llm.chat_model.clone(),
            modes: [Mode::Chat, Mode::StudyPlan],
        }),
    )
}
