use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{Stream, StreamExt};
use tokio::time::timeout;

use crate::application::ports::{
    ModelGateway, ModelGatewayError, PdfTextSource, PdfTextSourceError,
};
use crate::domain::{FormReset, FormState, Language, PdfContext, UploadedFile};
use crate::infrastructure::observability::sanitize_prompt;

use super::failure_message::failure_message;
use super::prompt_composer::PromptComposer;
use super::validation::{ValidationError, validate_form};

/// Characters shown when previewing an upload.
pub const DEFAULT_PDF_PREVIEW_CHARS: usize = 1_000;

/// Growing-prefix display updates: every item extends the previous one.
pub type DisplayStream = Pin<Box<dyn Stream<Item = String> + Send + 'static>>;

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub pdf_timeout: Duration,
    /// Bounds the initial gateway call and, when streaming, the wait for
    /// each subsequent delta.
    pub gateway_timeout: Duration,
    pub strict_validation: bool,
    pub pdf_preview_chars: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            pdf_timeout: Duration::from_secs(30),
            gateway_timeout: Duration::from_secs(60),
            strict_validation: false,
            pdf_preview_chars: DEFAULT_PDF_PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("gateway: {0}")]
    Gateway(#[from] ModelGatewayError),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("pdf: {0}")]
    Pdf(#[from] PdfTextSourceError),
}

pub struct RequestOrchestrator<G, P>
where
    G: ModelGateway,
    P: PdfTextSource,
{
    gateway: Arc<G>,
    pdf_source: Arc<P>,
    composer: Arc<PromptComposer>,
    settings: OrchestratorSettings,
}

impl<G, P> RequestOrchestrator<G, P>
where
    G: ModelGateway + 'static,
    P: PdfTextSource + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        pdf_source: Arc<P>,
        composer: PromptComposer,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            gateway,
            pdf_source,
            composer: Arc::new(composer),
            settings,
        }
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Best-effort PDF extraction. Any failure, including a timeout,
    /// yields empty context.
    pub async fn resolve_pdf_context(&self, file: Option<&UploadedFile>) -> PdfContext {
        resolve_pdf_context(
            self.pdf_source.as_ref(),
            &self.composer,
            file,
            self.settings.pdf_timeout,
        )
        .await
    }

    /// Text shown right after an upload, before any submission: the first
    /// `pdf_preview_chars` characters of the extraction, or a localized
    /// failure message. No upload previews as an empty string.
    #[tracing::instrument(
        skip(self, language, file),
        fields(language = %language, has_pdf = file.is_some())
    )]
    pub async fn preview_pdf(&self, language: Language, file: Option<&UploadedFile>) -> String {
        let Some(file) = file else {
            return String::new();
        };

        match extract_pdf_text(self.pdf_source.as_ref(), file, self.settings.pdf_timeout).await {
            Ok(text) => {
                let preview = PdfContext::from_extracted(&text, self.settings.pdf_preview_chars);
                tracing::info!(
                    filename = %file.filename,
                    pdf_chars = preview.char_count(),
                    "PDF preview ready"
                );
                if preview.as_str().len() < text.trim().len() {
                    format!("{}...", preview.as_str())
                } else {
                    preview.as_str().to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, filename = %file.filename, "PDF preview failed");
                failure_message(language, &e)
            }
        }
    }

    #[tracing::instrument(
        skip(self, form, file),
        fields(mode = %form.mode, language = %form.style.language, has_pdf = file.is_some())
    )]
    pub async fn try_handle(
        &self,
        form: &FormState,
        file: Option<&UploadedFile>,
    ) -> Result<String, OrchestratorError> {
        if self.settings.strict_validation {
            validate_form(form)?;
        }

        let pdf = self.resolve_pdf_context(file).await;
        let request = self.composer.compose(form, &pdf);

        tracing::debug!(
            prompt = %sanitize_prompt(&request.user_message),
            pdf_chars = pdf.char_count(),
            "Composed request"
        );

        let answer = timeout(self.settings.gateway_timeout, self.gateway.generate(&request))
            .await
            .map_err(|_| OrchestratorError::Timeout(self.settings.gateway_timeout))??;

        tracing::info!(answer_chars = answer.chars().count(), "Generation complete");
        Ok(answer)
    }

    /// Batch entry point. Always returns displayable text: failures are
    /// rendered through [`failure_message`] instead of being propagated.
    pub async fn handle(&self, form: &FormState, file: Option<&UploadedFile>) -> String {
        match self.try_handle(form, file).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, mode = %form.mode, "Request failed");
                failure_message(form.style.language, &e)
            }
        }
    }

    /// Streaming entry point. The stream is lazy; dropping it abandons the
    /// in-flight gateway call.
    pub fn handle_stream(&self, form: FormState, file: Option<UploadedFile>) -> DisplayStream {
        let gateway = Arc::clone(&self.gateway);
        let pdf_source = Arc::clone(&self.pdf_source);
        let composer = Arc::clone(&self.composer);
        let settings = self.settings.clone();
        let language = form.style.language;

        Box::pin(async_stream::stream! {
            tracing::info!(mode = %form.mode, language = %language, "Streaming request started");

            if settings.strict_validation {
                if let Err(e) = validate_form(&form) {
                    yield failure_message(language, &OrchestratorError::Validation(e));
                    return;
                }
            }

            let pdf = resolve_pdf_context(
                pdf_source.as_ref(),
                &composer,
                file.as_ref(),
                settings.pdf_timeout,
            )
            .await;
            let request = composer.compose(&form, &pdf);

            tracing::debug!(
                prompt = %sanitize_prompt(&request.user_message),
                pdf_chars = pdf.char_count(),
                "Composed request"
            );

            let mut deltas = match timeout(settings.gateway_timeout, gateway.generate_stream(&request)).await {
                Ok(Ok(deltas)) => deltas,
                Ok(Err(e)) => {
                    tracing::error!(error = %e, "Streaming generation failed to start");
                    yield failure_message(language, &OrchestratorError::Gateway(e));
                    return;
                }
                Err(_) => {
                    tracing::error!(timeout = ?settings.gateway_timeout, "Streaming generation timed out");
                    yield failure_message(language, &OrchestratorError::Timeout(settings.gateway_timeout));
                    return;
                }
            };

            let mut accumulated = String::new();
            let mut emitted = false;

            loop {
                match timeout(settings.gateway_timeout, deltas.next()).await {
                    Ok(Some(Ok(delta))) => {
                        if delta.is_empty() {
                            continue;
                        }
                        accumulated.push_str(&delta);
                        emitted = true;
                        yield accumulated.clone();
                    }
                    Ok(Some(Err(e))) => {
                        tracing::error!(error = %e, "Stream delta error");
                        append_failure(&mut accumulated, &failure_message(language, &OrchestratorError::Gateway(e)));
                        emitted = true;
                        yield accumulated.clone();
                        break;
                    }
                    Ok(None) => break,
                    Err(_) => {
                        tracing::error!(timeout = ?settings.gateway_timeout, "Stream stalled");
                        append_failure(
                            &mut accumulated,
                            &failure_message(language, &OrchestratorError::Timeout(settings.gateway_timeout)),
                        );
                        emitted = true;
                        yield accumulated.clone();
                        break;
                    }
                }
            }

            if !emitted {
                yield accumulated;
            }

            tracing::info!("Streaming request finished");
        })
    }

    pub fn clear(&self) -> FormReset {
        clear_form()
    }
}

/// Default values for the message box, the output box and the file picker.
pub fn clear_form() -> FormReset {
    FormReset::default()
}

async fn resolve_pdf_context<P>(
    pdf_source: &P,
    composer: &PromptComposer,
    file: Option<&UploadedFile>,
    limit: Duration,
) -> PdfContext
where
    P: PdfTextSource + ?Sized,
{
    let Some(file) = file else {
        return PdfContext::empty();
    };

    match extract_pdf_text(pdf_source, file, limit).await {
        Ok(text) => composer.pdf_context(&text),
        Err(e) => {
            tracing::warn!(error = %e, filename = %file.filename, "PDF extraction failed, continuing without context");
            PdfContext::empty()
        }
    }
}

async fn extract_pdf_text<P>(
    pdf_source: &P,
    file: &UploadedFile,
    limit: Duration,
) -> Result<String, OrchestratorError>
where
    P: PdfTextSource + ?Sized,
{
    timeout(limit, pdf_source.extract(file))
        .await
        .map_err(|_| OrchestratorError::Timeout(limit))?
        .map_err(OrchestratorError::from)
}

fn append_failure(accumulated: &mut String, message: &str) {
    if !accumulated.is_empty() {
        accumulated.push_str("\n\n");
    }
    accumulated.push_str(message);
}
