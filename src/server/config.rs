//! Server configuration types
//!
//! Mirrors `config/default.toml`; every section falls back to the same
//! defaults when absent.

use leadscout_core::PipelineSettings;
use leadscout_llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Stage tunables for the pipeline
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            static_roster_cap: self.pipeline.static_roster_cap,
            live_roster_cap: self.pipeline.live_roster_cap,
            min_table_chars: self.pipeline.min_table_chars,
            snippet_chars: self.pipeline.snippet_chars,
            max_snippets: self.pipeline.max_snippets,
            match_model: self.llm.model.clone(),
            profile_model: self.llm.profile_model.clone(),
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            timeout: Duration::from_secs(self.llm.timeout_secs),
            retry: RetryPolicy::new(
                self.pipeline.retry.max_attempts,
                Duration::from_millis(self.pipeline.retry.delay_ms),
            ),
        }
    }
}

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

/// Search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: leadscout_search::linkup::BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

/// Text-generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub profile_model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: leadscout_llm::openai::BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            profile_model: "gpt-4o".to_string(),
            timeout_secs: 120,
            max_tokens: 16_000,
            temperature: 0.7,
        }
    }
}

/// Stage caps and thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub static_roster_cap: usize,
    pub live_roster_cap: usize,
    pub min_table_chars: usize,
    pub snippet_chars: usize,
    pub max_snippets: usize,
    pub retry: RetryConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            static_roster_cap: 40,
            live_roster_cap: 10,
            min_table_chars: 200,
            snippet_chars: 200,
            max_snippets: 3,
            retry: RetryConfig::default(),
        }
    }
}

/// Scoring-call retry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_defaults() {
        let settings = AppConfig::default().pipeline_settings();
        assert_eq!(settings, PipelineSettings::default());
    }
}
