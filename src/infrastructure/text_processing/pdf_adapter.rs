use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{PdfTextSource, PdfTextSourceError};
use crate::domain::UploadedFile;

use super::text_sanitizer::sanitize_extracted_text;

/// Extracts text page by page with `pdf_oxide`.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, PdfTextSourceError> {
        let mut doc = PdfDocument::open(path).map_err(|e| {
            PdfTextSourceError::ExtractionFailed(format!("failed to parse PDF: {e}"))
        })?;

        let page_count = doc.page_count().map_err(|e| {
            PdfTextSourceError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::debug!(page = page_index + 1, error = %e, "Skipping unreadable page");
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl PdfTextSource for PdfAdapter {
    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.filename, size_bytes = file.size_bytes())
    )]
    async fn extract(&self, file: &UploadedFile) -> Result<String, PdfTextSourceError> {
        if !file.is_pdf() {
            return Err(PdfTextSourceError::UnsupportedContentType(
                file.content_type
                    .clone()
                    .unwrap_or_else(|| file.filename.clone()),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            PdfTextSourceError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(&file.data).map_err(|e| {
            PdfTextSourceError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        // The temp file is deleted on drop, so it moves into the blocking task.
        let pages = tokio::task::spawn_blocking(move || Self::extract_pages(temp_file.path()))
            .await
            .map_err(|e| PdfTextSourceError::ExtractionFailed(format!("task join error: {e}")))??;

        let page_count = pages.len();
        let text = pages
            .iter()
            .map(|page| sanitize_extracted_text(page))
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::info!(page_count, chars = text.chars().count(), "PDF text extraction complete");

        if text.is_empty() {
            return Err(PdfTextSourceError::NoTextFound(file.filename.clone()));
        }

        Ok(text)
    }
}
