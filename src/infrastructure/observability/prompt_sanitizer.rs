const MAX_VISIBLE_CHARS: usize = 100;

/// Sanitizes prompt text for safe logging.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let sanitized = if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total_chars)
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    const PATTERNS: [&str; 6] = [
        "Bearer ",
        "api_key=",
        "password=",
        "secret=",
        "token=",
        "hf_",
    ];

    let mut result = text.to_string();
    for pattern in PATTERNS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let value_start = search_from + found + pattern.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
                .map(|i| value_start + i)
                .unwrap_or(result.len());

            if value_end == value_start {
                search_from = value_start;
                continue;
            }

            let redacted_value = if pattern == "hf_" { "hf_[REDACTED]" } else { "[REDACTED]" };
            let prefix_end = if pattern == "hf_" { value_start - pattern.len() } else { value_start };
            result.replace_range(prefix_end..value_end, redacted_value);
            search_from = prefix_end + redacted_value.len();
        }
    }

    result
}
