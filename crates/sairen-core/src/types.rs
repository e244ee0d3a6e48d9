// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the completion client, memory, and handlers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Speaker of a single chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One message in a completion request, and one turn in a user's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// A request to the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered message list sent verbatim to the model.
    pub messages: Vec<ChatMessage>,
    /// Model override; `None` uses the provider's configured default.
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Creates a request from an ordered message list.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
        }
    }

    /// Creates a single-message request carrying one user prompt.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::user(text)])
    }
}

/// A reply from the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// The generated text of the first choice.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
}

