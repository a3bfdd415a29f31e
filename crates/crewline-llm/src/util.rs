//! Common utilities for LLM providers

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Longest error text passed through unchanged
const MAX_ERROR_LEN: usize = 300;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****".
///
/// # Examples
/// ```
/// use crewline_llm::util::mask_api_key;
/// assert_eq!(mask_api_key("sk-1234567890abcdef"), "sk-1...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY || !key.is_ascii() {
        return "****".to_string();
    }
    format!(
        "{}...{}",
        &key[..KEY_MASK_VISIBLE_CHARS],
        &key[key.len() - KEY_MASK_VISIBLE_CHARS..]
    )
}

/// Truncate to at most `max_bytes` without splitting a UTF-8 character.
#[must_use]
pub fn truncate_safe(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Replace provider error bodies that may echo credentials with a generic message.
#[must_use]
pub fn sanitize_api_error(error: &str, key_var: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return format!("API authentication error. Please check your {key_var}.");
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if lower.contains("internal") || lower.contains("server error") {
        return "API server error. Please try again later.".to_string();
    }

    if error.len() > MAX_ERROR_LEN {
        format!("{}...(truncated)", truncate_safe(error, MAX_ERROR_LEN))
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_long() {
        let masked = mask_api_key("sk-1234567890abcdefghij");
        assert_eq!(masked, "sk-1...ghij");
        assert!(!masked.contains("567890"));
    }

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_truncate_safe_multibyte() {
        assert_eq!(truncate_safe("héllo", 2), "h");
        assert_eq!(truncate_safe("abc", 10), "abc");
    }

    #[test]
    fn test_sanitize_api_error() {
        let sanitized = sanitize_api_error("Invalid API key: sk-1234567890", "OPENAI_API_KEY");
        assert!(!sanitized.contains("sk-"));
        assert!(sanitized.contains("OPENAI_API_KEY"));

        let sanitized = sanitize_api_error("Rate limit exceeded", "OPENAI_API_KEY");
        assert!(sanitized.contains("rate limit"));

        let long = "x".repeat(400);
        assert!(sanitize_api_error(&long, "K").ends_with("...(truncated)"));
    }
}
