//! Search response normalization
//!
//! The search service returns person lists under several shapes depending on
//! endpoint and version: a top-level `speakers`/`attendees` array, a nested
//! `structuredOutput` field (sometimes JSON-encoded as a string), or a nested
//! `data` field. Each shape is handled by one extraction strategy; the
//! normalizer tries them in order and takes the first that applies.

use crate::types::PersonRecord;
use serde_json::Value;
use tracing::debug;

/// Top-level keys holding a person list
pub const LIST_KEYS: &[&str] = &["speakers", "attendees"];

/// Keys of the nested structured-output field
pub const STRUCTURED_KEYS: &[&str] = &["structuredOutput", "structured_output"];

/// Alternate nested key
pub const ALTERNATE_KEY: &str = "data";

const NAME_KEYS: &[&str] = &["name", "full_name", "fullName"];
const TITLE_KEYS: &[&str] = &["title", "role", "job_title", "jobTitle", "position"];
const AFFILIATION_KEYS: &[&str] = &["affiliation", "company", "organization", "organisation"];
const ENRICHMENT_KEYS: &[&str] = &["enrichment", "snippets"];
const BIOGRAPHY_KEYS: &[&str] = &["biography", "bio", "description"];
const SNIPPET_TEXT_KEYS: &[&str] = &["snippet", "content", "text"];

/// A pure extraction: `None` means "this shape is not present"
pub type ExtractionStrategy = fn(&Value) -> Option<Vec<PersonRecord>>;

/// Ordered list of extraction strategies
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    strategies: Vec<(&'static str, ExtractionStrategy)>,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self {
            strategies: vec![
                ("direct_list", direct_list as ExtractionStrategy),
                ("structured_output", structured_output),
                ("alternate_data", alternate_data),
            ],
        }
    }
}

impl ResponseNormalizer {
    /// Register an additional strategy, tried after the existing ones
    #[must_use]
    pub fn with_strategy(mut self, name: &'static str, strategy: ExtractionStrategy) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    /// Names of the registered strategies, in order
    pub fn strategy_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|(name, _)| *name)
    }

    /// Extract person records; never fails, returns empty when no shape matches
    #[must_use]
    pub fn normalize(&self, response: &Value) -> Vec<PersonRecord> {
        for (name, strategy) in &self.strategies {
            if let Some(people) = strategy(response) {
                debug!(strategy = name, count = people.len(), "normalized search response");
                return people;
            }
        }
        debug!("no known person list shape in search response");
        Vec::new()
    }
}

/// A `speakers` or `attendees` array at the top level
pub fn direct_list(response: &Value) -> Option<Vec<PersonRecord>> {
    LIST_KEYS
        .iter()
        .find_map(|key| response.get(*key).and_then(Value::as_array))
        .map(|items| parse_people(items))
}

/// The nested structured-output field, string-encoded or not
pub fn structured_output(response: &Value) -> Option<Vec<PersonRecord>> {
    STRUCTURED_KEYS
        .iter()
        .find_map(|key| response.get(*key))
        .and_then(decode_nested)
        .and_then(|nested| people_in(&nested))
}

/// The nested `data` field, string-encoded or not
pub fn alternate_data(response: &Value) -> Option<Vec<PersonRecord>> {
    response
        .get(ALTERNATE_KEY)
        .and_then(decode_nested)
        .and_then(|nested| people_in(&nested))
}

/// Parse a string-encoded field; a parse failure counts as absent
fn decode_nested(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "nested structured output is not valid JSON");
                None
            }
        },
        Value::Null => None,
        other => Some(other.clone()),
    }
}

fn people_in(nested: &Value) -> Option<Vec<PersonRecord>> {
    match nested {
        Value::Array(items) => Some(parse_people(items)),
        other => direct_list(other),
    }
}

fn parse_people(items: &[Value]) -> Vec<PersonRecord> {
    items.iter().filter_map(parse_person).collect()
}

fn parse_person(item: &Value) -> Option<PersonRecord> {
    match item {
        Value::String(name) if !name.trim().is_empty() => {
            Some(PersonRecord::new(name.trim(), "", ""))
        }
        Value::Object(_) => {
            let name = first_text(item, NAME_KEYS)?;
            Some(PersonRecord {
                name,
                title: first_text(item, TITLE_KEYS).unwrap_or_default(),
                affiliation: first_text(item, AFFILIATION_KEYS).unwrap_or_default(),
                enrichment: snippets(item),
                biography: first_text(item, BIOGRAPHY_KEYS),
                background: None,
            })
        }
        _ => None,
    }
}

fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn snippets(item: &Value) -> Vec<String> {
    let Some(entries) = ENRICHMENT_KEYS
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_array))
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Object(_) => first_text(entry, SNIPPET_TEXT_KEYS),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster() -> Value {
        json!([
            {"name": "Ada Lovelace", "title": "CTO", "company": "Analytical Engines",
             "enrichment": ["Builds engines", {"snippet": "Raised Series A"}]},
            {"name": "Grace Hopper", "role": "Admiral", "affiliation": "Navy", "bio": "Compiler pioneer"},
            {"title": "No name, skipped"}
        ])
    }

    fn expected() -> Vec<PersonRecord> {
        vec![
            PersonRecord::new("Ada Lovelace", "CTO", "Analytical Engines")
                .with_snippet("Builds engines")
                .with_snippet("Raised Series A"),
            PersonRecord::new("Grace Hopper", "Admiral", "Navy").with_biography("Compiler pioneer"),
        ]
    }

    #[test]
    fn test_all_shapes_agree() {
        let normalizer = ResponseNormalizer::default();
        let encoded = serde_json::to_string(&json!({ "speakers": roster() })).unwrap();

        let shapes = [
            json!({ "speakers": roster() }),
            json!({ "attendees": roster() }),
            json!({ "structuredOutput": encoded.clone() }),
            json!({ "structuredOutput": { "attendees": roster() } }),
            json!({ "data": encoded }),
            json!({ "data": { "speakers": roster() }, "sources": [] }),
        ];

        for shape in &shapes {
            assert_eq!(normalizer.normalize(shape), expected(), "shape: {shape}");
        }
    }

    #[test]
    fn test_direct_list_wins_over_nested() {
        let response = json!({
            "speakers": [{"name": "Direct"}],
            "data": {"speakers": [{"name": "Nested"}]}
        });
        let people = ResponseNormalizer::default().normalize(&response);
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].name, "Direct");
    }

    #[test]
    fn test_bad_structured_string_falls_through() {
        let response = json!({
            "structuredOutput": "{not json",
            "data": {"attendees": [{"name": "Fallback"}]}
        });
        let people = ResponseNormalizer::default().normalize(&response);
        assert_eq!(people[0].name, "Fallback");
    }

    #[test]
    fn test_unknown_shape_is_empty() {
        let normalizer = ResponseNormalizer::default();
        assert!(normalizer.normalize(&json!({"answer": "nobody"})).is_empty());
        assert!(normalizer.normalize(&json!(null)).is_empty());
        assert!(normalizer.normalize(&json!({"data": "garbage"})).is_empty());
    }

    #[test]
    fn test_string_entries_and_bare_arrays() {
        let response = json!({"structuredOutput": "[\"Ada Lovelace\", \"  \"]"});
        let people = ResponseNormalizer::default().normalize(&response);
        assert_eq!(people, vec![PersonRecord::new("Ada Lovelace", "", "")]);
    }

    #[test]
    fn test_custom_strategy_registration() {
        fn people_key(response: &Value) -> Option<Vec<PersonRecord>> {
            response
                .get("people")
                .and_then(Value::as_array)
                .map(|items| parse_people(items))
        }

        let normalizer = ResponseNormalizer::default().with_strategy("people_key", people_key);
        assert_eq!(normalizer.strategy_names().count(), 4);

        let people = normalizer.normalize(&json!({"people": [{"name": "Custom"}]}));
        assert_eq!(people[0].name, "Custom");
    }
}
