use axum::Json;
use axum::response::IntoResponse;

use crate::application::services::clear_form;

/// Nothing is kept server-side, so clearing only hands back defaults.
pub async fn clear_handler() -> impl IntoResponse {
    Json(clear_form())
}
