//! Ideal customer profile resolution
//!
//! Three tiers, first non-empty answer wins:
//! 1. `IcpRegistry` lookup by company name or URL
//! 2. Deep web research scoped to the company's site
//! 3. The text-generation model's own knowledge

use crate::error::{Error, Result, Stage};
use crate::registry::IcpRegistry;
use crate::roster::url_host;
use crate::types::{IcpProfile, ProfileOrigin};
use leadscout_llm::{CompletionRequest, LlmProvider};
use leadscout_search::{answer_text, sources, SearchProvider, SearchQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Default model for the knowledge fallback
pub const DEFAULT_PROFILE_MODEL: &str = "gpt-4o";

/// Token budget for the knowledge fallback
pub const PROFILE_MAX_TOKENS: u32 = 1024;

const PROFILE_SYSTEM_PROMPT: &str = "You are an expert in B2B sales and ICP definition.";

/// Resolves a target company's ICP description
pub struct ProfileResolver {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn LlmProvider>,
    registry: IcpRegistry,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl ProfileResolver {
    /// Create a resolver with the built-in ICP registry
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            search,
            llm,
            registry: IcpRegistry::builtin(),
            model: DEFAULT_PROFILE_MODEL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(120),
        }
    }

    /// Replace the ICP registry
    #[must_use]
    pub fn with_registry(mut self, registry: IcpRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Model used by the knowledge fallback
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sampling temperature for the knowledge fallback
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Timeout for the knowledge fallback
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the ICP for `company_name` at `company_url`
    #[instrument(skip(self))]
    pub async fn resolve(&self, company_name: &str, company_url: &str) -> Result<IcpProfile> {
        if let Some(description) = self.registry.lookup([company_name, company_url]) {
            info!("using precomputed ICP");
            return Ok(IcpProfile {
                description: description.to_string(),
                sources: Vec::new(),
                origin: ProfileOrigin::Registry,
            });
        }

        if let Some(profile) = self.research(company_name, company_url).await {
            info!(sources = profile.sources.len(), "ICP resolved from web research");
            return Ok(profile);
        }

        let description = self.from_model_knowledge(company_name, company_url).await?;
        if description.is_empty() {
            return Err(Error::ProfileUnresolved {
                company: display_company(company_name, company_url),
            });
        }

        info!("ICP resolved from model knowledge");
        Ok(IcpProfile {
            description,
            sources: Vec::new(),
            origin: ProfileOrigin::ModelKnowledge,
        })
    }

    /// Research tier; any failure or empty answer yields `None`
    async fn research(&self, company_name: &str, company_url: &str) -> Option<IcpProfile> {
        let query = SearchQuery::new(research_prompt(company_name, company_url))
            .deep()
            .sourced_answer()
            .with_include_domains(url_host(company_url));

        let response = match self.search.search(query).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "ICP research failed, falling back to model knowledge");
                return None;
            }
        };

        match answer_text(&response) {
            Some(description) => Some(IcpProfile {
                description,
                sources: sources(&response),
                origin: ProfileOrigin::Research,
            }),
            None => {
                warn!("ICP research returned no answer, falling back to model knowledge");
                None
            }
        }
    }

    async fn from_model_knowledge(&self, company_name: &str, company_url: &str) -> Result<String> {
        let request = CompletionRequest::new(self.model.clone())
            .with_prompt(PROFILE_SYSTEM_PROMPT, knowledge_prompt(company_name, company_url))
            .with_max_tokens(PROFILE_MAX_TOKENS)
            .with_temperature(self.temperature)
            .with_timeout(self.timeout);

        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|e| Error::upstream(Stage::Profile, e))?;

        Ok(response.content.trim().to_string())
    }
}

fn display_company(company_name: &str, company_url: &str) -> String {
    if company_name.trim().is_empty() {
        company_url.to_string()
    } else {
        company_name.to_string()
    }
}

fn research_prompt(company_name: &str, company_url: &str) -> String {
    format!(
        "You are an expert in B2B SaaS market analysis. Identify and describe the Ideal \
         Customer Profile (ICP) for {company_name} (website: {company_url}). Focus your \
         research on the company's homepage, product pages, and any case studies or customer \
         testimonials available on the site. Analyze the target industries, company sizes, \
         buyer personas, and typical use cases addressed by {company_name}. Present your \
         findings in a concise bullet-point list, highlighting key characteristics and patterns."
    )
}

fn knowledge_prompt(company_name: &str, company_url: &str) -> String {
    format!(
        "Based on what you know about {company_name} (website: {company_url}), please provide:\n\n\
         1. **Company Overview**: Brief description of what the company does\n\
         2. **Ideal Customer Profile**:\n   \
         - Target industries\n   \
         - Company size (SMB, Mid-market, Enterprise)\n   \
         - Key decision-maker roles\n   \
         - Geographic focus\n\
         3. **Customer Pain Points**: What problems do they solve?\n\
         4. **Value Proposition**: Why customers choose them\n\n\
         Keep it concise and business-focused (3-4 paragraphs max)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LINKUP_ICP;
    use crate::testing::MockSearch;
    use leadscout_llm::MockProvider;
    use serde_json::json;

    fn resolver(search: MockSearch, llm: MockProvider) -> ProfileResolver {
        ProfileResolver::new(Arc::new(search), Arc::new(llm))
    }

    #[tokio::test]
    async fn test_registry_alias_short_circuits() {
        let mut search = MockSearch::new();
        search.expect_search().never();
        let llm = MockProvider::new();

        let profile = resolver(search, llm.clone())
            .resolve("your company", "https://www.linkup.so")
            .await
            .unwrap();

        assert_eq!(profile.origin, ProfileOrigin::Registry);
        assert_eq!(profile.description, LINKUP_ICP);
        assert!(profile.sources.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_research_answer_is_used() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|q| q.include_domains == vec!["acme.com".to_string()])
            .returning(|_| {
                Ok(json!({
                    "answer": "  - Mid-market logistics teams  ",
                    "sources": [{"name": "Acme", "url": "https://acme.com/customers"}]
                }))
            });
        let llm = MockProvider::new();

        let profile = resolver(search, llm.clone())
            .resolve("Acme", "https://acme.com")
            .await
            .unwrap();

        assert_eq!(profile.origin, ProfileOrigin::Research);
        assert_eq!(profile.description, "- Mid-market logistics teams");
        assert_eq!(profile.sources.len(), 1);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_research_falls_back_to_model() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .returning(|_| Err(leadscout_search::Error::Network("dns".to_string())));
        let llm = MockProvider::new();
        llm.push_text("Acme sells to freight brokers.");

        let profile = resolver(search, llm.clone())
            .resolve("Acme", "https://acme.com")
            .await
            .unwrap();

        assert_eq!(profile.origin, ProfileOrigin::ModelKnowledge);
        assert_eq!(profile.description, "Acme sells to freight brokers.");
        assert!(profile.sources.is_empty());

        let request = &llm.requests()[0];
        assert_eq!(request.model, DEFAULT_PROFILE_MODEL);
        assert_eq!(request.max_tokens, Some(PROFILE_MAX_TOKENS));
    }

    #[tokio::test]
    async fn test_both_tiers_empty_is_unresolved() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_| Ok(json!({"answer": ""})));
        let llm = MockProvider::new();
        llm.push_text("   ");

        let err = resolver(search, llm)
            .resolve("Acme", "https://acme.com")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProfileUnresolved { ref company } if company == "Acme"));
    }

    #[tokio::test]
    async fn test_fallback_transport_error_is_upstream() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_| Ok(json!({})));
        let llm = MockProvider::new();
        llm.push_failure("connection refused");

        let err = resolver(search, llm)
            .resolve("Acme", "https://acme.com")
            .await
            .unwrap_err();
        assert_eq!(err.stage(), Stage::Profile);
        assert_eq!(err.kind(), "upstream_service_error");
    }
}
