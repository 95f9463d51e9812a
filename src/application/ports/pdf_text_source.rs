use async_trait::async_trait;

use crate::domain::UploadedFile;

#[async_trait]
pub trait PdfTextSource: Send + Sync {
    /// Text of every page, in page order.
    async fn extract(&self, file: &UploadedFile) -> Result<String, PdfTextSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfTextSourceError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
