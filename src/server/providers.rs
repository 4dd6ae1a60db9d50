//! Provider construction
//!
//! Credentials come from the environment; endpoints and timeouts from
//! `AppConfig`. A missing key surfaces as `Error::Configuration`.

use super::config::{AppConfig, LlmConfig, SearchConfig};
use leadscout_core::{Error, Pipeline};
use leadscout_llm::{LlmProvider, OpenAiConfig, OpenAiProvider};
use leadscout_search::{LinkupClient, LinkupConfig, SearchProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Linkup client from `LINKUP_API_KEY` and `config`
pub fn build_search(config: &SearchConfig) -> leadscout_core::Result<Arc<dyn SearchProvider>> {
    let linkup = LinkupConfig::from_env()
        .map_err(|e| Error::Configuration(e.to_string()))?
        .with_base_url(config.base_url.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs));

    debug!(config = ?linkup, "search provider configured");
    let client = LinkupClient::new(linkup).map_err(|e| Error::Configuration(e.to_string()))?;
    Ok(Arc::new(client))
}

/// OpenAI-compatible provider from `OPENAI_API_KEY` and `config`
///
/// `OPENAI_BASE_URL`, when set, wins over the configured base URL.
pub fn build_llm(config: &LlmConfig) -> leadscout_core::Result<Arc<dyn LlmProvider>> {
    let mut openai = OpenAiConfig::from_env()
        .map_err(|e| Error::Configuration(e.to_string()))?
        .with_model(config.model.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs));
    if std::env::var("OPENAI_BASE_URL").is_err() {
        openai = openai.with_base_url(config.base_url.clone());
    }

    debug!(config = ?openai, "llm provider configured");
    let provider = OpenAiProvider::new(openai).map_err(|e| Error::Configuration(e.to_string()))?;
    Ok(Arc::new(provider))
}

/// Providers plus pipeline, or the first configuration error
pub fn build_pipeline(config: &AppConfig) -> leadscout_core::Result<Pipeline> {
    let search = build_search(&config.search)?;
    let llm = build_llm(&config.llm)?;
    Ok(Pipeline::new(search, llm, &config.pipeline_settings()))
}
