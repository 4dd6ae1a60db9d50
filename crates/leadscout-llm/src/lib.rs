//! Leadscout LLM - Text Generation Provider Abstraction
//!
//! This crate provides text-generation integration for Leadscout:
//! - Provider: the `LlmProvider` trait every backend implements
//! - OpenAI: OpenAI-compatible chat completions over HTTP
//! - Mock: scripted provider for tests
//! - Retry: bounded fixed-delay retry wrapper

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod retry;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::LlmProvider;
pub use retry::{call_with_retry, RetryError, RetryPolicy};
