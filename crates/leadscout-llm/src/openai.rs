//! OpenAI - chat completions provider
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint over
//! `reqwest`. JSON mode maps to `response_format: {"type": "json_object"}`.

use crate::completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::provider::LlmProvider;
use crate::util::{mask_api_key, sanitize_api_error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};

// ============================================================================
// Constants
// ============================================================================

/// OpenAI API base URL
pub const BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ============================================================================
// Configuration
// ============================================================================

/// OpenAI provider configuration
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,
    /// Base URL (proxies, Azure, compatible gateways)
    pub base_url: String,
    /// Default model
    pub default_model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::NotConfigured("OPENAI_API_KEY not set".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string());

        Ok(Self::new(api_key).with_base_url(base_url))
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ChatResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI LLM provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    fn map_send_error(&self, err: reqwest::Error, timeout: Duration) -> Error {
        if err.is_timeout() {
            Error::Timeout(timeout.as_millis() as u64)
        } else {
            Error::Network(err.to_string())
        }
    }
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let body = ChatRequest {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: match request.response_format {
                ResponseFormat::JsonObject => Some(ChatResponseFormat {
                    r#type: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e, timeout))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit);
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {text}"));
            return Err(Error::Api(sanitize_api_error(&message)));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("No choices in response".to_string()))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
            model: parsed.model,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = OpenAiConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://proxy.local/v1/")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.base_url, "https://proxy.local/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_debug_masks_key() {
        let config = OpenAiConfig::new("sk-1234567890abcdefghij");
        let debug = format!("{config:?}");
        assert!(debug.contains("sk-1...ghij"));
        assert!(!debug.contains("567890"));
    }

    #[test]
    fn test_json_mode_serialization() {
        let messages = vec![Message::user("hi")];
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: Some(16000),
            temperature: Some(0.7),
            response_format: Some(ChatResponseFormat {
                r#type: "json_object",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 16000);
    }

    #[test]
    fn test_response_parsing_null_content() {
        let raw = r#"{"model":"gpt-4o-mini","choices":[{"message":{"content":null},"finish_reason":"stop"}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.usage.is_none());
    }
}
