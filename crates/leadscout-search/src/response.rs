//! Helpers for reading untyped search responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cited source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title or site name
    #[serde(default, alias = "title")]
    pub name: String,
    /// Source URL
    #[serde(default)]
    pub url: String,
    /// Excerpt used by the answer
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// The natural-language answer of a sourced-answer response, if non-empty
#[must_use]
pub fn answer_text(response: &Value) -> Option<String> {
    response
        .get("answer")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Cited sources; malformed entries are skipped
#[must_use]
pub fn sources(response: &Value) -> Vec<Source> {
    let Some(items) = response.get("sources").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value::<Source>(item.clone()).ok())
        .filter(|s| !s.url.is_empty() || !s.name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_text() {
        assert_eq!(
            answer_text(&json!({"answer": "  - SaaS teams  "})),
            Some("- SaaS teams".to_string())
        );
        assert_eq!(answer_text(&json!({"answer": "   "})), None);
        assert_eq!(answer_text(&json!({"results": []})), None);
    }

    #[test]
    fn test_sources_lenient() {
        let response = json!({
            "sources": [
                {"name": "Event page", "url": "https://example.com/e", "snippet": "Speakers"},
                {"title": "Blog", "url": "https://blog.example.com", "content": "Recap"},
                "not an object",
                {}
            ]
        });

        let found = sources(&response);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Event page");
        assert_eq!(found[1].name, "Blog");
        assert_eq!(found[1].snippet.as_deref(), Some("Recap"));
    }

    #[test]
    fn test_sources_missing() {
        assert!(sources(&json!({"answer": "x"})).is_empty());
    }
}
