//! Data model shared by every pipeline stage
//!
//! All values live for a single run. Each stage returns new values; the only
//! in-place change is the table builder filling in `PersonRecord::background`.

use crate::error::{Error, Result};
use crate::table::AttendeeTable;
use chrono::{DateTime, Utc};
use leadscout_search::Source;
use serde::{Deserialize, Serialize};

/// Version tag written into every report
pub const WORKFLOW_VERSION: &str = "v2_4step";

/// Company name used in prompts when the request names none
pub const DEFAULT_COMPANY_NAME: &str = "your company";

// ============================================================================
// Inbound request
// ============================================================================

/// One analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Event page URL (or other event identifier)
    #[serde(alias = "event_identifier")]
    pub event_url: String,
    /// Human-readable event name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Target company website or domain
    #[serde(alias = "company_identifier")]
    pub company_url: String,
    /// Target company name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl AnalysisRequest {
    /// Create a request
    #[must_use]
    pub fn new(event_url: impl Into<String>, company_url: impl Into<String>) -> Self {
        Self {
            event_url: event_url.into(),
            event_name: None,
            company_url: company_url.into(),
            company_name: None,
        }
    }

    /// Set the company name
    #[must_use]
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Set the event name
    #[must_use]
    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    /// Reject requests without an event or company identifier
    pub fn validate(&self) -> Result<()> {
        if self.event_url.trim().is_empty() {
            return Err(Error::InvalidRequest("event_url is required".to_string()));
        }
        if self.company_url.trim().is_empty() {
            return Err(Error::InvalidRequest("company_url is required".to_string()));
        }
        Ok(())
    }

    /// Company name for prompts and reports
    #[must_use]
    pub fn company_display_name(&self) -> &str {
        self.company_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_COMPANY_NAME)
    }
}

// ============================================================================
// People
// ============================================================================

/// A person discovered for an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Full name
    pub name: String,
    /// Job title
    #[serde(default)]
    pub title: String,
    /// Company or organization
    #[serde(default)]
    pub affiliation: String,
    /// Research snippets about the person or company, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enrichment: Vec<String>,
    /// Free-text biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    /// Display summary derived by the table builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl PersonRecord {
    /// Create a record
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        affiliation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            affiliation: affiliation.into(),
            ..Default::default()
        }
    }

    /// Append an enrichment snippet
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.enrichment.push(snippet.into());
        self
    }

    /// Set the biography
    #[must_use]
    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = Some(biography.into());
        self
    }
}

/// Where a roster came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Precomputed roster registered for the event
    Static,
    /// Discovered by a live search
    Live,
}

impl Provenance {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Live => "live",
        }
    }
}

/// Output of attendee discovery
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    /// People, capped
    pub people: Vec<PersonRecord>,
    /// Citations for live discovery
    pub sources: Vec<Source>,
    /// Static or live
    pub provenance: Provenance,
    /// Count before capping
    pub discovered_count: usize,
}

// ============================================================================
// Ideal customer profile
// ============================================================================

/// How an ICP description was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileOrigin {
    /// Built-in description for a known company
    Registry,
    /// Live web research
    Research,
    /// Generated from model knowledge only
    ModelKnowledge,
}

/// A resolved ideal customer profile
#[derive(Debug, Clone, PartialEq)]
pub struct IcpProfile {
    /// Natural-language description
    pub description: String,
    /// Research citations (empty unless researched)
    pub sources: Vec<Source>,
    /// Resolution tier that produced it
    pub origin: ProfileOrigin,
}

// ============================================================================
// Matches
// ============================================================================

/// Lead bucket, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OpportunityType {
    /// Average 0-30
    Poor,
    /// Average 31-60
    Moderate,
    /// Average 61-85
    Good,
    /// Average 86-100
    Perfect,
}

impl OpportunityType {
    /// Bucket for an average score
    ///
    /// Band edges sit between the integer bands, so an average of 85.5
    /// counts as `Perfect` and 30.5 as `Moderate`.
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average > 85.0 {
            Self::Perfect
        } else if average > 60.0 {
            Self::Good
        } else if average > 30.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Perfect => "Perfect",
        }
    }
}

/// Optional contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// LinkedIn URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Twitter/X handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl ContactInfo {
    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.linkedin.is_none() && self.email.is_none() && self.twitter.is_none()
    }
}

/// One scored attendee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name
    pub name: String,
    /// Role or title
    pub role: String,
    /// Company
    pub company: String,
    /// Fit against the ICP, 0-100
    pub icp_match_score: u8,
    /// Potential business value, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_value_score: Option<u8>,
    /// Short explanation
    #[serde(alias = "reasoning")]
    pub match_reasoning: String,
    /// Bucket from the average score
    pub opportunity_type: OpportunityType,
    /// Next step
    pub recommended_action: String,
    /// Contact details, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
}

impl MatchResult {
    /// Mean of both scores, or the ICP score alone when business value is absent
    #[must_use]
    pub fn average_score(&self) -> f64 {
        match self.business_value_score {
            Some(value) => (f64::from(self.icp_match_score) + f64::from(value)) / 2.0,
            None => f64::from(self.icp_match_score),
        }
    }
}

/// Bucket counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Always equal to the number of scored attendees
    pub total_attendees_analyzed: usize,
    /// Perfect bucket
    pub perfect_matches: usize,
    /// Good bucket
    pub good_matches: usize,
    /// Moderate bucket
    pub moderate_matches: usize,
    /// Poor bucket
    pub poor_matches: usize,
}

impl MatchSummary {
    /// Count buckets from the attendee list
    #[must_use]
    pub fn tally(attendees: &[MatchResult]) -> Self {
        attendees.iter().fold(
            Self {
                total_attendees_analyzed: attendees.len(),
                ..Self::default()
            },
            |mut summary, attendee| {
                match attendee.opportunity_type {
                    OpportunityType::Perfect => summary.perfect_matches += 1,
                    OpportunityType::Good => summary.good_matches += 1,
                    OpportunityType::Moderate => summary.moderate_matches += 1,
                    OpportunityType::Poor => summary.poor_matches += 1,
                }
                summary
            },
        )
    }
}

/// Scoring output (`step4_matches`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Counters
    pub summary: MatchSummary,
    /// Attendees, best first
    pub attendees: Vec<MatchResult>,
    /// One-sentence assessment
    pub overall_event_assessment: String,
    /// Follow-up recommendations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl MatchReport {
    /// Attendees in a given bucket
    pub fn in_bucket(&self, bucket: OpportunityType) -> impl Iterator<Item = &MatchResult> + '_ {
        self.attendees
            .iter()
            .filter(move |a| a.opportunity_type == bucket)
    }
}

// ============================================================================
// Report
// ============================================================================

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Event identifier
    pub event_url: String,
    /// Event name, if given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Target company identifier
    pub company_url: String,
    /// Target company name
    pub company_name: String,
    /// Completion time
    pub analysis_date: DateTime<Utc>,
    /// Pipeline version tag
    pub workflow_version: String,
    /// Static or live roster
    pub attendee_provenance: Provenance,
    /// Roster size before capping
    pub attendees_discovered: usize,
    /// Roster size after capping
    pub attendees_analyzed: usize,
    /// ICP resolution tier
    pub profile_origin: ProfileOrigin,
}

/// A stage's payload with its citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutput<T> {
    /// Stage payload
    pub data: T,
    /// Citations
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl<T> StageOutput<T> {
    /// Wrap a payload
    pub fn new(data: T, sources: Vec<Source>) -> Self {
        Self { data, sources }
    }
}

/// Final pipeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub metadata: ReportMetadata,
    /// Discovered people
    pub step1_attendees: StageOutput<Vec<PersonRecord>>,
    /// Tabular attendee text fed to scoring
    pub step2_enriched: StageOutput<AttendeeTable>,
    /// ICP description
    pub step3_icp: StageOutput<String>,
    /// Scores
    pub step4_matches: MatchReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(icp: u8, value: Option<u8>) -> MatchResult {
        let mut r = MatchResult {
            name: "A".to_string(),
            role: "CTO".to_string(),
            company: "Acme".to_string(),
            icp_match_score: icp,
            business_value_score: value,
            match_reasoning: String::new(),
            opportunity_type: OpportunityType::Poor,
            recommended_action: String::new(),
            contact_info: None,
        };
        r.opportunity_type = OpportunityType::from_average(r.average_score());
        r
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(OpportunityType::from_average(0.0), OpportunityType::Poor);
        assert_eq!(OpportunityType::from_average(30.0), OpportunityType::Poor);
        assert_eq!(OpportunityType::from_average(31.0), OpportunityType::Moderate);
        assert_eq!(OpportunityType::from_average(60.0), OpportunityType::Moderate);
        assert_eq!(OpportunityType::from_average(61.0), OpportunityType::Good);
        assert_eq!(OpportunityType::from_average(85.0), OpportunityType::Good);
        assert_eq!(OpportunityType::from_average(85.5), OpportunityType::Perfect);
        assert_eq!(OpportunityType::from_average(100.0), OpportunityType::Perfect);
        assert!(OpportunityType::Perfect > OpportunityType::Good);
        assert!(OpportunityType::Moderate > OpportunityType::Poor);
    }

    #[test]
    fn test_average_uses_both_scores() {
        assert_eq!(result(90, Some(70)).average_score(), 80.0);
        assert_eq!(result(90, None).average_score(), 90.0);
        assert_eq!(result(90, Some(70)).opportunity_type, OpportunityType::Good);
    }

    #[test]
    fn test_tally() {
        let attendees = vec![
            result(95, Some(90)),
            result(70, Some(70)),
            result(40, Some(40)),
            result(10, Some(5)),
            result(12, None),
        ];
        let summary = MatchSummary::tally(&attendees);
        assert_eq!(summary.total_attendees_analyzed, 5);
        assert_eq!(summary.perfect_matches, 1);
        assert_eq!(summary.good_matches, 1);
        assert_eq!(summary.moderate_matches, 1);
        assert_eq!(summary.poor_matches, 2);
    }

    #[test]
    fn test_opportunity_serialization() {
        assert_eq!(
            serde_json::to_string(&OpportunityType::Perfect).unwrap(),
            "\"Perfect\""
        );
        assert_eq!(OpportunityType::Moderate.as_str(), "Moderate");
    }

    #[test]
    fn test_request_validation() {
        assert!(AnalysisRequest::new("https://e.com", "https://c.com")
            .validate()
            .is_ok());
        let err = AnalysisRequest::new(" ", "https://c.com").validate().unwrap_err();
        assert!(err.to_string().contains("event_url"));
        let err = AnalysisRequest::new("https://e.com", "").validate().unwrap_err();
        assert!(err.to_string().contains("company_url"));
    }

    #[test]
    fn test_request_aliases_and_defaults() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{"event_identifier": "https://e.com", "company_url": "https://c.com"}"#,
        )
        .unwrap();
        assert_eq!(request.event_url, "https://e.com");
        assert_eq!(request.company_display_name(), DEFAULT_COMPANY_NAME);
        assert_eq!(
            request.with_company_name("Acme").company_display_name(),
            "Acme"
        );
    }
}
