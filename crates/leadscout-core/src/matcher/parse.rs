//! Lenient decoding of the scoring response
//!
//! Scores may arrive as integers, floats or numeric strings and are clamped
//! to 0..=100. `opportunity_type` is always derived from the scores. The
//! generated summary is decoded as-is so the engine can compare it against
//! the attendee list before replacing it.

use crate::types::{ContactInfo, MatchReport, MatchResult, MatchSummary, OpportunityType};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*\r?\n?")
        .expect("OPENING_FENCE is a compile-time constant")
});

/// Remove markdown code fence markers, with or without a language tag
///
/// The opening and closing markers are stripped independently, so a reply
/// cut off before its closing fence still decodes.
///
/// ```
/// use leadscout_core::matcher::parse::strip_code_fence;
///
/// assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
/// assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
/// ```
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match OPENING_FENCE.find(trimmed) {
        Some(opening) => &trimmed[opening.end()..],
        None => trimmed,
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Decode the scoring JSON into a report, leaving ranking to the caller
pub fn parse_match_report(raw: &str) -> Result<MatchReport, String> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| format!("invalid JSON: {e}"))?;

    let object = value
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    let attendees = match object.get("attendees") {
        Some(Value::Array(items)) => items.iter().filter_map(parse_result).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err("`attendees` is not an array".to_string()),
    };

    let recommendations = object
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let summary = object
        .get("summary")
        .cloned()
        .and_then(|summary| serde_json::from_value::<MatchSummary>(summary).ok())
        .unwrap_or_default();

    Ok(MatchReport {
        summary,
        attendees,
        overall_event_assessment: text(&value, "overall_event_assessment"),
        recommendations,
    })
}

fn parse_result(item: &Value) -> Option<MatchResult> {
    if !item.is_object() {
        return None;
    }
    let name = text(item, "name");
    if name.is_empty() {
        warn!("dropping scored entry without a name");
        return None;
    }

    let icp_match_score = score(item, "icp_match_score").unwrap_or_else(|| {
        warn!(name = %name, "missing icp_match_score, defaulting to 0");
        0
    });
    let business_value_score = score(item, "business_value_score");

    let mut result = MatchResult {
        name,
        role: first_text(item, &["role", "title"]),
        company: first_text(item, &["company", "affiliation"]),
        icp_match_score,
        business_value_score,
        match_reasoning: first_text(item, &["match_reasoning", "reasoning"]),
        opportunity_type: OpportunityType::Poor,
        recommended_action: text(item, "recommended_action"),
        contact_info: item.get("contact_info").and_then(contact_info),
    };
    result.opportunity_type = OpportunityType::from_average(result.average_score());
    Some(result)
}

/// A 0..=100 score from a number or numeric string
fn score(item: &Value, key: &str) -> Option<u8> {
    let raw = match item.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

fn contact_info(value: &Value) -> Option<ContactInfo> {
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("n/a"))
            .map(str::to_string)
    };
    let info = ContactInfo {
        linkedin: field("linkedin"),
        email: field("email"),
        twitter: field("twitter"),
    };
    (!info.is_empty()).then_some(info)
}

fn text(item: &Value, key: &str) -> String {
    first_text(item, &[key])
}

fn first_text(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| item.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}
