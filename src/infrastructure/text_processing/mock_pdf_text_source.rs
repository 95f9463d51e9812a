use crate::application::ports::{PdfTextSource, PdfTextSourceError};
use crate::domain::UploadedFile;

/// Treats the upload as UTF-8 text, or fails every call.
pub struct MockPdfTextSource {
    fail: bool,
}

impl MockPdfTextSource {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

impl Default for MockPdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PdfTextSource for MockPdfTextSource {
    async fn extract(&self, file: &UploadedFile) -> Result<String, PdfTextSourceError> {
        if self.fail {
            return Err(PdfTextSourceError::ExtractionFailed(
                "simulated extraction failure".to_string(),
            ));
        }
        String::from_utf8(file.data.to_vec())
            .map_err(|e| PdfTextSourceError::ExtractionFailed(e.to_string()))
    }
}
