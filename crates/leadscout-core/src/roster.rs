//! Attendee discovery
//!
//! Known events are served from a `RosterRegistry`; everything else goes
//! through a live structured search whose response is normalized into
//! person records. Both paths are capped, the live one more tightly.

use crate::error::{Error, Result, Stage};
use crate::normalizer::ResponseNormalizer;
use crate::registry::RosterRegistry;
use crate::types::{PersonRecord, Provenance, Roster};
use leadscout_search::{sources, SearchProvider, SearchQuery};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default cap for registry rosters
pub const DEFAULT_STATIC_CAP: usize = 40;

/// Default cap for live-discovered rosters
pub const DEFAULT_LIVE_CAP: usize = 10;

/// Professional networking sites searched alongside the event host
pub const NETWORKING_DOMAINS: &[&str] = &[
    "linkedin.com",
    "twitter.com",
    "x.com",
    "eventbrite.com",
    "lu.ma",
    "partiful.com",
];

/// Supplies the people associated with an event
pub struct AttendeeSource {
    search: Arc<dyn SearchProvider>,
    registry: RosterRegistry,
    normalizer: ResponseNormalizer,
    static_cap: usize,
    live_cap: usize,
}

impl AttendeeSource {
    /// Create a source backed by `search` with the built-in roster registry
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self {
            search,
            registry: RosterRegistry::builtin(),
            normalizer: ResponseNormalizer::default(),
            static_cap: DEFAULT_STATIC_CAP,
            live_cap: DEFAULT_LIVE_CAP,
        }
    }

    /// Replace the roster registry
    #[must_use]
    pub fn with_registry(mut self, registry: RosterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the response normalizer
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Set the caps for static and live rosters
    #[must_use]
    pub fn with_caps(mut self, static_cap: usize, live_cap: usize) -> Self {
        self.static_cap = static_cap;
        self.live_cap = live_cap;
        self
    }

    /// Discover the roster for an event
    #[instrument(skip(self))]
    pub async fn discover(&self, event_url: &str, event_name: Option<&str>) -> Result<Roster> {
        let (people, citations, provenance) = match self.registry.lookup(event_url) {
            Some((pattern, people)) => {
                info!(pattern, count = people.len(), "using precomputed roster");
                (people.to_vec(), Vec::new(), Provenance::Static)
            }
            None => {
                let response = self.live_search(event_url, event_name).await?;
                let people = self.normalizer.normalize(&response);
                (people, sources(&response), Provenance::Live)
            }
        };

        if people.is_empty() {
            return Err(Error::NoAttendeesFound {
                event: event_url.to_string(),
            });
        }

        let roster = cap_roster(people, citations, provenance, self.cap_for(provenance));
        info!(
            provenance = provenance.as_str(),
            discovered = roster.discovered_count,
            kept = roster.people.len(),
            "attendee discovery complete"
        );
        Ok(roster)
    }

    fn cap_for(&self, provenance: Provenance) -> usize {
        match provenance {
            Provenance::Static => self.static_cap,
            Provenance::Live => self.live_cap,
        }
    }

    async fn live_search(&self, event_url: &str, event_name: Option<&str>) -> Result<Value> {
        let mut domains: Vec<String> = url_host(event_url).into_iter().collect();
        domains.extend(NETWORKING_DOMAINS.iter().map(|d| d.to_string()));

        let query = SearchQuery::new(discovery_prompt(event_url, event_name))
            .deep()
            .structured(roster_schema())
            .with_include_domains(domains);

        debug!(domains = ?query.include_domains, "running live attendee discovery");
        self.search
            .search(query)
            .await
            .map_err(|e| Error::upstream(Stage::Discovery, e))
    }
}

/// Stable-prefix truncation that remembers the original size
pub fn cap_roster(
    mut people: Vec<PersonRecord>,
    sources: Vec<leadscout_search::Source>,
    provenance: Provenance,
    cap: usize,
) -> Roster {
    let discovered_count = people.len();
    people.truncate(cap);
    Roster {
        people,
        sources,
        provenance,
        discovered_count,
    }
}

/// Host of a URL, without `www.`
///
/// Identifiers without a scheme, such as `lu.ma/abc`, are read as `https`.
pub fn url_host(url: &str) -> Option<String> {
    let url = url.trim();
    let url = reqwest::Url::parse(url)
        .ok()
        .filter(|parsed| parsed.host_str().is_some())
        .or_else(|| reqwest::Url::parse(&format!("https://{url}")).ok())?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

fn discovery_prompt(event_url: &str, event_name: Option<&str>) -> String {
    let event = event_name.unwrap_or(event_url);
    format!(
        "You are an expert business analyst researching attendees for the event '{event}'.\n\
         The event page is at {event_url}.\n\
         Extract every person publicly listed as a speaker, attendee, sponsor or organizer.\n\
         For each person return their full name, job title, company, and a short \
         professional biography if one is published.\n\
         Focus on factual information from the event page, speaker lists and bios, \
         and public announcements about attending. Do not invent people."
    )
}

fn roster_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "speakers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "title": { "type": "string" },
                        "company": { "type": "string" },
                        "bio": { "type": "string" }
                    },
                    "required": ["name"]
                }
            }
        },
        "required": ["speakers"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearch;
    use leadscout_search::OutputType;

    fn people(n: usize) -> Vec<PersonRecord> {
        (0..n)
            .map(|i| PersonRecord::new(format!("Person {i}"), "Founder", format!("Co {i}")))
            .collect()
    }

    fn live_payload(n: usize) -> Value {
        let speakers: Vec<Value> = (0..n)
            .map(|i| json!({"name": format!("Live {i}"), "title": "CTO", "company": "Acme"}))
            .collect();
        json!({
            "structuredOutput": { "speakers": speakers },
            "sources": [{"name": "Event page", "url": "https://summit.example.com", "snippet": "Speakers"}]
        })
    }

    #[tokio::test]
    async fn test_static_roster_skips_search() {
        let mut search = MockSearch::new();
        search.expect_search().never();

        let registry = RosterRegistry::new().with_roster("known-event", people(50));
        let source = AttendeeSource::new(Arc::new(search)).with_registry(registry);

        let roster = source
            .discover("https://events.example.com/Known-Event/2025", None)
            .await
            .unwrap();

        assert_eq!(roster.provenance, Provenance::Static);
        assert_eq!(roster.people, people(DEFAULT_STATIC_CAP));
        assert_eq!(roster.discovered_count, 50);
        assert!(roster.sources.is_empty());
    }

    #[tokio::test]
    async fn test_live_roster_is_capped_tighter() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|q| {
                q.output_type == OutputType::Structured
                    && q.include_domains.first().map(String::as_str) == Some("summit.example.com")
            })
            .times(1)
            .returning(|_| Ok(live_payload(12)));

        let source = AttendeeSource::new(Arc::new(search)).with_registry(RosterRegistry::new());
        let roster = source
            .discover("https://www.summit.example.com/speakers", Some("Summit"))
            .await
            .unwrap();

        assert_eq!(roster.provenance, Provenance::Live);
        assert_eq!(roster.people.len(), DEFAULT_LIVE_CAP);
        assert!(roster.people.len() < DEFAULT_STATIC_CAP);
        assert_eq!(roster.people[0].name, "Live 0");
        assert_eq!(roster.discovered_count, 12);
        assert_eq!(roster.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_schemeless_event_keeps_host_filter() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|q| q.include_domains.first().map(String::as_str) == Some("lu.ma"))
            .times(1)
            .returning(|_| Ok(live_payload(2)));

        let source = AttendeeSource::new(Arc::new(search)).with_registry(RosterRegistry::new());
        let roster = source.discover("lu.ma/founders-night", None).await.unwrap();

        assert_eq!(roster.provenance, Provenance::Live);
        assert_eq!(roster.people.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_live_roster_is_terminal() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .times(1)
            .returning(|_| Ok(json!({"answer": "No individuals found on this page."})));

        let source = AttendeeSource::new(Arc::new(search)).with_registry(RosterRegistry::new());
        let err = source.discover("https://lu.ma/private", None).await.unwrap_err();
        assert!(matches!(err, Error::NoAttendeesFound { .. }));
    }

    #[tokio::test]
    async fn test_search_failure_is_upstream_error() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .returning(|_| Err(leadscout_search::Error::Timeout(120_000)));

        let source = AttendeeSource::new(Arc::new(search)).with_registry(RosterRegistry::new());
        let err = source.discover("https://lu.ma/x", None).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Discovery);
        assert_eq!(err.kind(), "upstream_service_error");
    }

    #[test]
    fn test_url_host() {
        assert_eq!(url_host("https://www.cerebralvalley.ai/e/1").as_deref(), Some("cerebralvalley.ai"));
        assert_eq!(url_host("lu.ma/abc").as_deref(), Some("lu.ma"));
        assert_eq!(url_host(" www.summit.dev/2025 ").as_deref(), Some("summit.dev"));
        assert_eq!(url_host("localhost:8080/event").as_deref(), Some("localhost"));
        assert_eq!(url_host(""), None);
        assert_eq!(url_host("not a url"), None);
    }
}
