use std::sync::Arc;

use crate::application::ports::{ModelGateway, PdfTextSource};
use crate::application::services::RequestOrchestrator;
use crate::presentation::config::Settings;

pub struct AppState<G, P>
where
    G: ModelGateway,
    P: PdfTextSource,
{
    pub orchestrator: Arc<RequestOrchestrator<G, P>>,
    pub settings: Settings,
}

impl<G, P> Clone for AppState<G, P>
where
    G: ModelGateway,
    P: PdfTextSource,
{
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            settings: self.settings.clone(),
        }
    }
}
