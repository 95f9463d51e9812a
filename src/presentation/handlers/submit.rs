use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::application::ports::{ModelGateway, PdfTextSource};
use crate::presentation::state::AppState;

use super::form::read_submission;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub output: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(super) fn bad_form(error: impl std::fmt::Display) -> axum::response::Response {
    tracing::warn!(error = %error, "Rejected malformed submission");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// SSE frames cannot carry carriage returns.
fn sse_safe(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Batch submission. Gateway failures still answer 200: the output is the
/// localized failure text the UI renders in place of an answer.
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_handler<G, P>(
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

    let output = state
        .orchestrator
        .handle(&submission.form, submission.file.as_ref())
        .await;

    (StatusCode::OK, Json(SubmitResponse { output })).into_response()
}

/// Streaming submission over SSE. Each `message` event carries the full
/// text accumulated so far; a final `done` event closes the stream.
#[tracing::instrument(skip(state, multipart))]
pub async fn submit_stream_handler<G, P>(
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

    let keep_alive_seconds = state.settings.requests.sse_keep_alive_seconds;
    let updates = state
        .orchestrator
        .handle_stream(submission.form, submission.file)
        .map(|text| Ok::<_, Infallible>(Event::default().data(sse_safe(&text))))
        .chain(stream::once(async {
            Ok(Event::default().event("done").data("[DONE]"))
        }));

    Sse::new(updates)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(keep_alive_seconds))
                .text("keep-alive"),
        )
        .into_response()
}
