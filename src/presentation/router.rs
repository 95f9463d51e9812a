use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ModelGateway, PdfTextSource};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_handler, fields_handler, health_handler, pdf_preview_handler, submit_handler,
    submit_stream_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<G, P>(state: AppState<G, P>) -> Router
where
    G: ModelGateway + 'static,
    P: PdfTextSource + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.requests.max_upload_bytes());

    Router::new()
        .route("/health", get(health_handler::<G, P>))
        .route("/api/v1/modes/{mode}/fields", get(fields_handler))
        .route("/api/v1/submit", post(submit_handler::<G, P>))
        .route("/api/v1/submit/stream", post(submit_stream_handler::<G, P>))
        .route("/api/v1/pdf/preview", post(pdf_preview_handler::<G, P>))
        .route("/api/v1/clear", post(clear_handler))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
