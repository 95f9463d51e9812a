mod mock_pdf_text_source;
mod pdf_adapter;
mod text_sanitizer;

pub use mock_pdf_text_source::MockPdfTextSource;
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::sanitize_extracted_text;
