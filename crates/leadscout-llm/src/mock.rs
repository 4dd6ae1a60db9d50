//! Mock LLM Provider for testing
//!
//! Replays a queue of scripted outcomes and records every request it sees.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

enum Scripted {
    Text(String),
    Failure(Error),
}

/// A mock LLM provider that returns queued responses or a default one.
#[derive(Clone)]
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    fallback: String,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback: "mock response".to_string(),
        }
    }

    /// Queue a successful completion.
    pub fn push_text(&self, content: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted::Text(content.into()));
        self
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted::Failure(Error::Network(message.into())));
        self
    }

    /// Queue a specific provider error.
    pub fn push_error(&self, error: Error) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted::Failure(error));
        self
    }

    /// Number of `complete` calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Copies of every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        let content = match next {
            Some(Scripted::Text(text)) => text,
            Some(Scripted::Failure(error)) => return Err(error),
            None => self.fallback.clone(),
        };

        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: "mock-model".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[tokio::test]
    async fn test_script_is_replayed_in_order() {
        let mock = MockProvider::new();
        mock.push_failure("connection reset").push_text("{\"ok\":true}");

        let request = CompletionRequest::new("").with_message(Message::user("hi"));
        assert!(mock.complete(request.clone()).await.is_err());
        let second = mock.complete(request.clone()).await.unwrap();
        assert_eq!(second.content, "{\"ok\":true}");
        let third = mock.complete(request).await.unwrap();
        assert_eq!(third.content, "mock response");

        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.requests()[0].messages[0].content, "hi");
    }
}
