//! Prompt messages sent to the generation service
//!
//! Every Leadscout call is single-shot: one system instruction followed by
//! one user prompt. Model replies are never fed back, so there is no
//! assistant role.

use serde::{Deserialize, Serialize};

/// Sender of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Standing instructions
    System,
    /// The task itself
    User,
}

/// One prompt message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Sender
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// The instruction and task pair, in send order
    #[must_use]
    pub fn prompt(system: impl Into<String>, user: impl Into<String>) -> [Self; 2] {
        [Self::system(system), Self::user(user)]
    }
}
