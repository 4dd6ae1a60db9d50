//! Common utilities for LLM providers

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Longest provider error message passed through verbatim
const MAX_ERROR_LEN: usize = 300;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
///
/// # Examples
/// ```
/// use leadscout_llm::util::mask_api_key;
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

/// Truncate to at most `max_chars` characters without splitting a UTF-8 sequence
#[must_use]
pub fn truncate_safe(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Sanitize a provider error message before it reaches users
///
/// Credentials-related and quota messages are replaced with generic text;
/// long messages are truncated.
///
/// # Examples
/// ```
/// use leadscout_llm::util::sanitize_api_error;
/// assert_eq!(
///     sanitize_api_error("Incorrect API key provided: sk-abc"),
///     "API authentication error. Please check your API key configuration."
/// );
/// assert_eq!(sanitize_api_error("Connection reset"), "Connection reset");
/// ```
#[must_use]
pub fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("api key")
        || lower.contains("apikey")
        || lower.contains("invalid key")
        || lower.contains("unauthorized")
        || lower.contains("authentication")
    {
        return "API authentication error. Please check your API key configuration.".to_string();
    }

    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded. Please try again later.".to_string();
    }

    if error.chars().count() > MAX_ERROR_LEN {
        format!("{}...(truncated)", truncate_safe(error, MAX_ERROR_LEN))
    } else {
        error.to_string()
    }
}
