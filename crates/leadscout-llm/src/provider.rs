//! LLM Provider trait definition
//!
//! This module defines the core trait that all LLM providers must implement.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;

/// Trait for LLM providers
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Complete a conversation (text only)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
