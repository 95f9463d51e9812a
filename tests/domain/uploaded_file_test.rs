use bytes::Bytes;

use scholia::domain::UploadedFile;

#[test]
fn given_pdf_mime_when_checking_then_is_pdf() {
    let file = UploadedFile::new(
        "upload".to_string(),
        Some("application/pdf".to_string()),
        Bytes::from_static(b"%PDF"),
    );
    assert!(file.is_pdf());
}

#[test]
fn given_octet_stream_with_pdf_extension_when_checking_then_is_pdf() {
    let file = UploadedFile::new(
        "Lecture.PDF".to_string(),
        Some("application/octet-stream".to_string()),
        Bytes::from_static(b"%PDF"),
    );
    assert!(file.is_pdf());
}

#[test]
fn given_text_file_when_checking_then_is_not_pdf() {
    let file = UploadedFile::new(
        "notes.txt".to_string(),
        Some("text/plain".to_string()),
        Bytes::from_static(b"hello"),
    );
    assert!(!file.is_pdf());
    assert_eq!(file.size_bytes(), 5);
}
