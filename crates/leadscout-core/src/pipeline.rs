//! Pipeline orchestration
//!
//! Discovery and ICP resolution run concurrently; the table is built from the
//! capped roster and scored once both are done. The first terminal stage error
//! aborts the run.

use crate::error::Result;
use crate::matcher::{MatchEngine, DEFAULT_MATCH_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::profile::{ProfileResolver, DEFAULT_PROFILE_MODEL};
use crate::registry::{IcpRegistry, RosterRegistry};
use crate::roster::{AttendeeSource, DEFAULT_LIVE_CAP, DEFAULT_STATIC_CAP};
use crate::table::{AttendeeTableBuilder, DEFAULT_MAX_SNIPPETS, DEFAULT_SNIPPET_CHARS};
use crate::types::{AnalysisRequest, Report, ReportMetadata, StageOutput, WORKFLOW_VERSION};
use leadscout_llm::{LlmProvider, RetryPolicy};
use leadscout_search::SearchProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Tunables for every stage
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Cap for registry rosters
    pub static_roster_cap: usize,
    /// Cap for live rosters
    pub live_roster_cap: usize,
    /// Shortest table worth scoring
    pub min_table_chars: usize,
    /// Per-snippet character budget in the table
    pub snippet_chars: usize,
    /// Snippets per background cell
    pub max_snippets: usize,
    /// Scoring model
    pub match_model: String,
    /// Knowledge-fallback model for ICP resolution
    pub profile_model: String,
    /// Scoring completion budget
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-call generation timeout
    pub timeout: Duration,
    /// Retry policy for the scoring call
    pub retry: RetryPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            static_roster_cap: DEFAULT_STATIC_CAP,
            live_roster_cap: DEFAULT_LIVE_CAP,
            min_table_chars: crate::matcher::DEFAULT_MIN_TABLE_CHARS,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            max_snippets: DEFAULT_MAX_SNIPPETS,
            match_model: DEFAULT_MATCH_MODEL.to_string(),
            profile_model: DEFAULT_PROFILE_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: crate::matcher::DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// The four-stage lead discovery pipeline
pub struct Pipeline {
    attendees: AttendeeSource,
    tables: AttendeeTableBuilder,
    profiles: ProfileResolver,
    matcher: MatchEngine,
}

impl Pipeline {
    /// Wire every stage from shared providers, built-in registries and `settings`
    pub fn new(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: &PipelineSettings,
    ) -> Self {
        Self::with_registries(
            search,
            llm,
            settings,
            RosterRegistry::builtin(),
            IcpRegistry::builtin(),
        )
    }

    /// Like [`Pipeline::new`] with caller-supplied registries
    pub fn with_registries(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn LlmProvider>,
        settings: &PipelineSettings,
        rosters: RosterRegistry,
        profiles: IcpRegistry,
    ) -> Self {
        let attendees = AttendeeSource::new(Arc::clone(&search))
            .with_registry(rosters)
            .with_caps(settings.static_roster_cap, settings.live_roster_cap);

        let tables = AttendeeTableBuilder::new(settings.snippet_chars, settings.max_snippets);

        let profiles = ProfileResolver::new(search, Arc::clone(&llm))
            .with_registry(profiles)
            .with_model(settings.profile_model.clone())
            .with_temperature(settings.temperature)
            .with_timeout(settings.timeout);

        let matcher = MatchEngine::new(llm)
            .with_model(settings.match_model.clone())
            .with_max_tokens(settings.max_tokens)
            .with_temperature(settings.temperature)
            .with_timeout(settings.timeout)
            .with_retry(settings.retry)
            .with_min_table_chars(settings.min_table_chars);

        Self::from_stages(attendees, tables, profiles, matcher)
    }

    /// Assemble from individually configured stages
    pub fn from_stages(
        attendees: AttendeeSource,
        tables: AttendeeTableBuilder,
        profiles: ProfileResolver,
        matcher: MatchEngine,
    ) -> Self {
        Self {
            attendees,
            tables,
            profiles,
            matcher,
        }
    }

    /// Run every stage for `request`
    #[instrument(
        skip(self, request),
        fields(run_id = %Uuid::new_v4(), event = %request.event_url, company = %request.company_url)
    )]
    pub async fn run(&self, request: &AnalysisRequest) -> Result<Report> {
        request.validate()?;
        let company_name = request.company_display_name();

        info!("starting analysis");
        let (roster, profile) = tokio::try_join!(
            self.attendees
                .discover(&request.event_url, request.event_name.as_deref()),
            self.profiles.resolve(company_name, &request.company_url),
        )?;

        let mut people = roster.people;
        let table = self.tables.build(&mut people);

        let matches = self
            .matcher
            .score(company_name, &profile.description, &table)
            .await?;

        let metadata = ReportMetadata {
            event_url: request.event_url.clone(),
            event_name: request.event_name.clone(),
            company_url: request.company_url.clone(),
            company_name: company_name.to_string(),
            analysis_date: chrono::Utc::now(),
            workflow_version: WORKFLOW_VERSION.to_string(),
            attendee_provenance: roster.provenance,
            attendees_discovered: roster.discovered_count,
            attendees_analyzed: people.len(),
            profile_origin: profile.origin,
        };

        info!(
            provenance = roster.provenance.as_str(),
            analyzed = matches.summary.total_attendees_analyzed,
            "analysis complete"
        );

        Ok(Report {
            metadata,
            step1_attendees: StageOutput::new(people, roster.sources),
            step2_enriched: StageOutput::new(table, Vec::new()),
            step3_icp: StageOutput::new(profile.description, profile.sources),
            step4_matches: matches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Stage};
    use crate::registry::LINKUP_ICP;
    use crate::testing::MockSearch;
    use crate::types::{PersonRecord, Provenance, ProfileOrigin};
    use leadscout_llm::MockProvider;
    use serde_json::json;

    fn settings() -> PipelineSettings {
        PipelineSettings {
            retry: RetryPolicy::new(3, Duration::ZERO),
            ..PipelineSettings::default()
        }
    }

    fn roster() -> Vec<PersonRecord> {
        vec![
            PersonRecord::new("Ada Lovelace", "CTO", "Analytical Engines")
                .with_snippet("Builds general-purpose computing engines for research labs and banks."),
            PersonRecord::new("Grace Hopper", "Rear Admiral", "US Navy")
                .with_biography("Pioneer of machine-independent programming languages and compilers."),
        ]
    }

    const SCORED: &str = r#"{"attendees": [
        {"name": "Ada Lovelace", "role": "CTO", "company": "Analytical Engines",
         "icp_match_score": 90, "business_value_score": 90, "match_reasoning": "Fit",
         "recommended_action": "Demo"},
        {"name": "Grace Hopper", "role": "Rear Admiral", "company": "US Navy",
         "icp_match_score": 20, "business_value_score": 30, "match_reasoning": "No fit",
         "recommended_action": "Skip"}
    ], "overall_event_assessment": "One lead."}"#;

    #[tokio::test]
    async fn test_static_roster_with_registry_profile() {
        let mut search = MockSearch::new();
        search.expect_search().never();
        let llm = MockProvider::new();
        llm.push_text(SCORED);

        let pipeline = Pipeline::with_registries(
            Arc::new(search),
            Arc::new(llm.clone()),
            &settings(),
            RosterRegistry::new().with_roster("demo-summit", roster()),
            IcpRegistry::builtin(),
        );

        let request = AnalysisRequest::new("https://events.io/demo-summit", "https://linkup.so")
            .with_company_name("Linkup");
        let report = pipeline.run(&request).await.unwrap();

        assert_eq!(report.metadata.attendee_provenance, Provenance::Static);
        assert_eq!(report.metadata.profile_origin, ProfileOrigin::Registry);
        assert_eq!(report.metadata.attendees_analyzed, 2);
        assert_eq!(report.metadata.workflow_version, WORKFLOW_VERSION);
        assert_eq!(report.step3_icp.data, LINKUP_ICP);
        assert_eq!(report.step2_enriched.data.row_count(), 2);
        assert!(report.step1_attendees.data.iter().all(|p| p.background.is_some()));
        assert_eq!(report.step4_matches.summary.perfect_matches, 1);
        assert_eq!(report.step4_matches.summary.poor_matches, 1);
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_any_call() {
        let mut search = MockSearch::new();
        search.expect_search().never();
        let llm = MockProvider::new();

        let pipeline = Pipeline::new(Arc::new(search), Arc::new(llm.clone()), &settings());
        let err = pipeline
            .run(&AnalysisRequest::new("https://lu.ma/x", "  "))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidRequest(_)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_discovery_failure_aborts_run() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|query| {
            if query.q.contains("Ideal Customer Profile") {
                Ok(json!({"answer": "Logistics teams"}))
            } else {
                Ok(json!({"structuredOutput": {"speakers": []}}))
            }
        });
        let llm = MockProvider::new();

        let pipeline = Pipeline::with_registries(
            Arc::new(search),
            Arc::new(llm.clone()),
            &settings(),
            RosterRegistry::new(),
            IcpRegistry::new(),
        );
        let err = pipeline
            .run(&AnalysisRequest::new("https://lu.ma/empty", "https://acme.com"))
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Discovery);
        assert!(matches!(err, Error::NoAttendeesFound { .. }));
        assert_eq!(llm.call_count(), 0);
    }
}
