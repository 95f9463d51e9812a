use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::domain::ComposedRequest;

/// Incremental text deltas produced by a streaming generation.
pub type TokenStream =
    Pin<Box<dyn Stream<Item = Result<String, ModelGatewayError>> + Send + 'static>>;

#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn generate(&self, request: &ComposedRequest) -> Result<String, ModelGatewayError>;

    async fn generate_stream(
        &self,
        request: &ComposedRequest,
    ) -> Result<TokenStream, ModelGatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelGatewayError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("misconfigured gateway: {0}")]
    Misconfigured(String),
}
