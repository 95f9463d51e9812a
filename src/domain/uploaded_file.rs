use bytes::Bytes;

const PDF_MIME: &str = "application/pdf";

/// A file handed over by the UI shell, held in memory for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: String, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename,
            content_type,
            data,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// Browsers often send `application/octet-stream`, so the extension
    /// counts as well.
    pub fn is_pdf(&self) -> bool {
        let by_mime = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_MIME));
        let by_extension = self.filename.to_lowercase().ends_with(".pdf");
        by_mime || by_extension
    }
}
