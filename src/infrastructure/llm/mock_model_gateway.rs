use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{ModelGateway, ModelGatewayError, TokenStream};
use crate::domain::ComposedRequest;

enum Script {
    Deltas(Vec<String>),
    FailAfter(Vec<String>),
    Fail,
}

/// Scripted gateway for tests and offline runs. Remembers the last
/// request it received.
pub struct MockModelGateway {
    script: Script,
    delay: Duration,
    last_request: Mutex<Option<ComposedRequest>>,
}

impl MockModelGateway {
    pub fn with_deltas<I, S>(deltas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Script::Deltas(deltas.into_iter().map(Into::into).collect()))
    }

    /// Emits `deltas`, then a network error.
    pub fn failing_after<I, S>(deltas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Script::FailAfter(deltas.into_iter().map(Into::into).collect()))
    }

    pub fn failing() -> Self {
        Self::new(Script::Fail)
    }

    /// Sleeps before answering, to exercise timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn last_request(&self) -> Option<ComposedRequest> {
        self.last_request
            .lock()
            .map(|guard| (*guard).clone())
            .unwrap_or(None)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            last_request: Mutex::new(None),
        }
    }

    async fn record(&self, request: &ComposedRequest) {
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn network_failure() -> ModelGatewayError {
    ModelGatewayError::ApiRequestFailed("simulated network failure".to_string())
}

#[async_trait::async_trait]
impl ModelGateway for MockModelGateway {
    async fn generate(&self, request: &ComposedRequest) -> Result<String, ModelGatewayError> {
        self.record(request).await;
        match &self.script {
            Script::Deltas(deltas) => Ok(deltas.concat()),
            Script::FailAfter(_) | Script::Fail => Err(network_failure()),
        }
    }

    async fn generate_stream(
        &self,
        request: &ComposedRequest,
    ) -> Result<TokenStream, ModelGatewayError> {
        self.record(request).await;
        let items: Vec<Result<String, ModelGatewayError>> = match &self.script {
            Script::Deltas(deltas) => deltas.iter().cloned().map(Ok).collect(),
            Script::FailAfter(deltas) => deltas
                .iter()
                .cloned()
                .map(Ok)
                .chain(std::iter::once(Err(network_failure())))
                .collect(),
            Script::Fail => return Err(network_failure()),
        };
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
