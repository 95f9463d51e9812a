use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{ModelGateway, PdfTextSource};
use crate::presentation::state::AppState;

use super::form::read_submission;
use super::submit::bad_form;

#[derive(Serialize)]
pub struct PdfPreviewResponse {
    pub preview: String,
}

/// Shows what was read from an upload as soon as it is attached. Reads the
/// `pdf` part plus an optional `language` for failure text; other parts
/// are ignored.
#[tracing::instrument(skip(state, multipart))]
pub async fn pdf_preview_handler<G, P>(
    State(state): State<AppState<G, P>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    G: ModelGateway + 'static,
    P: PdfTextSource + 'static,
{
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => return bad_form(e),
    };

    let Some(file) = submission.file else {
        return bad_form("missing pdf part");
    };

    let preview = state
        .orchestrator
        .preview_pdf(submission.form.style.language, Some(&file))
        .await;

    (StatusCode::OK, Json(PdfPreviewResponse { preview })).into_response()
}
