//! Linkup - web search API client
//!
//! `POST {base_url}/search` with a bearer token. The response body is
//! returned as raw JSON.

use crate::error::{Error, Result};
use crate::provider::SearchProvider;
use crate::query::SearchQuery;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Linkup API base URL
pub const BASE_URL: &str = "https://api.linkup.so/v1";

/// Deep searches routinely take over a minute
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Linkup client configuration
#[derive(Clone)]
pub struct LinkupConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for LinkupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked = if self.api_key.len() > 8 && self.api_key.is_ascii() {
            format!(
                "{}...{}",
                &self.api_key[..4],
                &self.api_key[self.api_key.len() - 4..]
            )
        } else {
            "****".to_string()
        };
        f.debug_struct("LinkupConfig")
            .field("api_key", &masked)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LinkupConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LINKUP_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::NotConfigured("LINKUP_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Linkup search client
pub struct LinkupClient {
    client: Client,
    config: LinkupConfig,
}

impl LinkupClient {
    /// Create a new client
    pub fn new(config: LinkupConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LinkupConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl SearchProvider for LinkupClient {
    fn name(&self) -> &str {
        "linkup"
    }

    #[instrument(skip(self, query), fields(depth = ?query.depth, output = ?query.output_type))]
    async fn search(&self, query: SearchQuery) -> Result<serde_json::Value> {
        debug!(domains = query.include_domains.len(), "Sending Linkup search");

        let response = self
            .client
            .post(format!("{}/search", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    Error::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Linkup request failed");
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .or_else(|| v.get("message"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or(text);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LinkupConfig::new("lk-1234567890abcdef")
            .with_base_url("http://localhost:9000/v1/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_masks_key() {
        let debug = format!("{:?}", LinkupConfig::new("lk-1234567890abcdef"));
        assert!(debug.contains("lk-1...cdef"));
        assert!(!debug.contains("567890"));
    }

    #[test]
    fn test_client_builds() {
        assert!(LinkupClient::new(LinkupConfig::new("key")).is_ok());
    }
}
