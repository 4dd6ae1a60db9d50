//! ICP scoring
//!
//! `MatchEngine` sends the ICP and the attendee table to the text-generation
//! provider in a single JSON-mode request, retries transport failures under a
//! fixed `RetryPolicy`, and turns the answer into a ranked `MatchReport`
//! whose counters are always recomputed from the attendee list.

pub mod parse;
pub mod prompt;

use crate::error::{Error, Result, Stage};
use crate::table::AttendeeTable;
use crate::types::{MatchReport, MatchSummary};
use leadscout_llm::util::sanitize_api_error;
use leadscout_llm::{call_with_retry, CompletionRequest, LlmProvider, RetryPolicy};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub use parse::{parse_match_report, strip_code_fence};
pub use prompt::{build_match_prompt, is_unscoreable, DEFAULT_MIN_TABLE_CHARS, NO_DATA_PHRASES};

/// Default scoring model
pub const DEFAULT_MATCH_MODEL: &str = "gpt-4o-mini";

/// Default completion budget for the scoring call
pub const DEFAULT_MAX_TOKENS: u32 = 16_000;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default per-attempt timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Assessment returned when there is nothing to score
pub const NO_DATA_ASSESSMENT: &str = "Could not extract attendee information from the event page. \
The page may be private, behind authentication, or dynamically loaded with JavaScript that \
prevented data extraction.";

/// Remediation steps returned when there is nothing to score
pub const NO_DATA_RECOMMENDATIONS: [&str; 3] = [
    "Try a different event URL with publicly visible attendee lists",
    "Check if the event has a public speakers or sponsors page",
    "Consider using event platforms that display public RSVPs (some Eventbrite or Luma events)",
];

/// The zero-result sentinel
#[must_use]
pub fn no_data_report() -> MatchReport {
    MatchReport {
        summary: MatchSummary::default(),
        attendees: Vec::new(),
        overall_event_assessment: NO_DATA_ASSESSMENT.to_string(),
        recommendations: NO_DATA_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Sort attendees best first (stable) and recompute the counters from the list
pub fn rank_and_tally(report: &mut MatchReport) {
    report.attendees.sort_by(|a, b| {
        b.average_score()
            .partial_cmp(&a.average_score())
            .unwrap_or(Ordering::Equal)
    });

    let tallied = MatchSummary::tally(&report.attendees);
    if report.summary != tallied {
        warn!(
            generated = report.summary.total_attendees_analyzed,
            actual = tallied.total_attendees_analyzed,
            "generated summary disagrees with attendee list, recomputing"
        );
    }
    report.summary = tallied;
}

/// Scores an attendee table against an ICP
pub struct MatchEngine {
    llm: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    retry: RetryPolicy,
    min_table_chars: usize,
}

impl MatchEngine {
    /// Create an engine with default model, budget and retry policy
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            model: DEFAULT_MATCH_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            min_table_chars: DEFAULT_MIN_TABLE_CHARS,
        }
    }

    /// Set the scoring model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the completion budget
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the per-attempt timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the minimum table length worth scoring
    #[must_use]
    pub fn with_min_table_chars(mut self, min_table_chars: usize) -> Self {
        self.min_table_chars = min_table_chars;
        self
    }

    /// Score every row of `table` for `company_name` against `icp`
    #[instrument(skip(self, icp, table), fields(table_chars = table.char_len()))]
    pub async fn score(
        &self,
        company_name: &str,
        icp: &str,
        table: &AttendeeTable,
    ) -> Result<MatchReport> {
        if is_unscoreable(table, self.min_table_chars) {
            info!("attendee table carries no usable roster, returning sentinel");
            return Ok(no_data_report());
        }

        let request = CompletionRequest::new(self.model.clone())
            .with_prompt(prompt::SYSTEM_PROMPT, build_match_prompt(company_name, icp, table))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_json_output()
            .with_timeout(self.timeout);

        let response = call_with_retry(self.llm.as_ref(), &request, &self.retry)
            .await
            .map_err(|e| Error::UpstreamService {
                stage: Stage::Matching,
                message: sanitize_api_error(&e.to_string()),
            })?;

        let mut report =
            parse_match_report(&response.content).map_err(|message| Error::MalformedResponse {
                stage: Stage::Matching,
                message,
                raw: response.content.clone(),
            })?;

        rank_and_tally(&mut report);
        info!(
            analyzed = report.summary.total_attendees_analyzed,
            perfect = report.summary.perfect_matches,
            good = report.summary.good_matches,
            "scoring complete"
        );
        Ok(report)
    }
}
