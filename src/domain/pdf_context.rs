/// Supplementary text extracted from an uploaded PDF, already bounded in
/// length. Created per request and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfContext(String);

impl PdfContext {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Keeps at most `max_chars` characters of `text`, cutting on a char
    /// boundary.
    pub fn from_extracted(text: &str, max_chars: usize) -> Self {
        let trimmed = text.trim();
        let bounded = match trimmed.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &trimmed[..byte_idx],
            None => trimmed,
        };
        Self(bounded.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}
