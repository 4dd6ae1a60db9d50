//! Scoring prompt and the no-data pre-check

use crate::table::AttendeeTable;

/// System prompt for the scoring call
pub const SYSTEM_PROMPT: &str =
    "You are an expert sales and marketing analyst specializing in ICP analysis and lead qualification.";

/// Tables shorter than this (in characters) are not worth scoring
pub const DEFAULT_MIN_TABLE_CHARS: usize = 200;

/// Phrases that mark a table as carrying no usable roster
pub const NO_DATA_PHRASES: &[&str] = &[
    "no individuals found",
    "no detailed information",
    "no data is available",
    "no attendees",
    "not available",
    "cannot be found",
];

/// True when `table` is too short or contains a no-data marker
pub fn is_unscoreable(table: &AttendeeTable, min_chars: usize) -> bool {
    if table.char_len() < min_chars {
        return true;
    }
    let lowered = table.as_str().to_lowercase();
    NO_DATA_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// User prompt for scoring every row of `table` against `icp`
pub fn build_match_prompt(company_name: &str, icp: &str, table: &AttendeeTable) -> String {
    format!(
        r#"You are an expert sales and marketing analyst. Your task is to analyze the attendees and their companies from an event and determine which ones are a good match for {company_name}'s Ideal Customer Profile (ICP).

IMPORTANT: Only analyze people who are actually listed in the Event Attendees table below. Do NOT make up or hallucinate any attendees. If no attendees are listed, return an empty attendees array.

## {company_name}'s ICP:
{icp}

## Event Attendees with Company Information:
{table}

## Your Task:
Analyze EVERY attendee and their company. You MUST return an entry for EACH person in the table above. For each person, generate:

1. **ICP Match Score (0-100)**: How well the person matches {company_name}'s ICP
   - 86-100: Perfect ICP fit (matches target industries, roles, and pain points)
   - 61-85: Good match (relevant role or company)
   - 31-60: Moderate match (some relevance)
   - 0-30: Poor match (not relevant to {company_name}'s target market)

2. **Business Value Score (0-100)**: The potential business value
   - 86-100: Exceptional (key decision makers, industry leaders)
   - 61-85: High value (decision makers, influencers, partners)
   - 31-60: Moderate (potential users/customers)
   - 0-30: Low value

3. **Match Reasoning**: 1-2 sentences explaining the scores

4. **Opportunity Type** (based on the average of both scores):
   - "Perfect" - Average 86-100
   - "Good" - Average 61-85
   - "Moderate" - Average 31-60
   - "Poor" - Average 0-30

5. **Recommended Action**: Brief next step

## Output Format:
Return a single JSON object with exactly this schema. Include ALL attendees from the input.

{{
  "summary": {{
    "total_attendees_analyzed": <number, MUST equal the length of the attendees array>,
    "perfect_matches": <number>,
    "good_matches": <number>,
    "moderate_matches": <number>,
    "poor_matches": <number>
  }},
  "attendees": [
    {{
      "name": "<name>",
      "role": "<title>",
      "company": "<company>",
      "icp_match_score": <0-100>,
      "business_value_score": <0-100>,
      "match_reasoning": "<1-2 sentences>",
      "opportunity_type": "<Perfect|Good|Moderate|Poor>",
      "recommended_action": "<brief action>"
    }}
  ],
  "overall_event_assessment": "<1 sentence summary>"
}}

You MUST analyze every single person. Do not truncate or skip anyone."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_table_is_unscoreable() {
        let table = AttendeeTable::from("| Name |\n|---|\n| Ada |");
        assert!(is_unscoreable(&table, DEFAULT_MIN_TABLE_CHARS));
        assert!(!is_unscoreable(&table, 5));
    }

    #[test]
    fn test_no_data_phrase_is_unscoreable() {
        let padding = "x".repeat(300);
        let table = AttendeeTable::from(format!("{padding} Data NOT AVAILABLE for this event"));
        assert!(is_unscoreable(&table, DEFAULT_MIN_TABLE_CHARS));

        let clean = AttendeeTable::from(padding);
        assert!(!is_unscoreable(&clean, DEFAULT_MIN_TABLE_CHARS));
    }

    #[test]
    fn test_prompt_embeds_inputs() {
        let table = AttendeeTable::from("| Ada | CTO | Engines | Builds things |");
        let prompt = build_match_prompt("Acme", "Mid-market logistics", &table);
        assert!(prompt.contains("good match for Acme's Ideal Customer Profile"));
        assert!(prompt.contains("Mid-market logistics"));
        assert!(prompt.contains("| Ada | CTO | Engines | Builds things |"));
        assert!(prompt.contains("\"total_attendees_analyzed\""));
        assert!(prompt.contains("Do NOT make up"));
    }
}
