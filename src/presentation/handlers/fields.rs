use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{FieldId, Mode, fields_relevant_for};

use super::submit::ErrorResponse;

#[derive(Serialize)]
pub struct FieldsResponse {
    pub mode: Mode,
    pub fields: Vec<FieldId>,
}

/// Which form fields the UI should show for `mode`.
pub async fn fields_handler(Path(mode): Path<String>) -> impl IntoResponse {
    match mode.parse::<Mode>() {
        Ok(mode) => (
            StatusCode::OK,
            Json(FieldsResponse {
                mode,
                fields: fields_relevant_for(mode).to_vec(),
            }),
        )
            .into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response(),
    }
}
