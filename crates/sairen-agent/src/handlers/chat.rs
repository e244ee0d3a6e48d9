// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational replies grounded in reference content.
//!
//! Prompt layout sent to the completion service:
//! 1. system persona
//! 2. the user's full transcript, ending with the new message
//! 3. a system instruction carrying every reference cache entry
//!
//! The user's transcript stays locked from the first append until the
//! assistant turn is recorded, so concurrent requests from one user cannot
//! interleave.

use std::sync::Arc;

use sairen_context::ReferenceCache;
use sairen_core::traits::ProviderAdapter;
use sairen_core::{ChatMessage, CompletionRequest};
use sairen_memory::ConversationMemory;
use tracing::{debug, warn};

use crate::reply::clean_reply;
use crate::response::AgentResponse;

/// Returned as `{error}` when the completion call fails.
pub const CHAT_FAILED: &str = "Failed to generate a response";

/// The default persona for an assistant called `name`.
pub fn default_persona(name: &str) -> String {
    format!(
        "You are {name}. Provide helpful, concise responses without special characters. \
         Use simple language and keep answers brief."
    )
}

/// Builds the trailing context instruction.
pub fn context_instruction(context: &str) -> String {
    format!("Based on the following context: \"{context}\", provide a contextual response.")
}

pub struct ChatHandler {
    provider: Arc<dyn ProviderAdapter>,
    memory: ConversationMemory,
    references: ReferenceCache,
    persona: String,
}

impl ChatHandler {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        memory: ConversationMemory,
        references: ReferenceCache,
        persona: String,
    ) -> Self {
        Self {
            provider,
            memory,
            references,
            persona,
        }
    }

    /// Answers `message` for `user_id`, recording both turns on success.
    ///
    /// On completion failure the user turn stays recorded, no assistant turn
    /// is added, and an error response is returned.
    pub async fn chat(&self, message: &str, user_id: &str) -> AgentResponse {
        let mut session = self.memory.session(user_id).await;
        session.append(ChatMessage::user(message));

        let context = self.references.render_context().await;
        let mut messages = Vec::with_capacity(session.history().len() + 2);
        messages.push(ChatMessage::system(&self.persona));
        messages.extend_from_slice(session.history());
        messages.push(ChatMessage::system(context_instruction(&context)));

        match self.provider.complete(CompletionRequest::new(messages)).await {
            Ok(response) => {
                let reply = clean_reply(&response.content);
                session.append(ChatMessage::assistant(&reply));
                debug!(user_id, turns = session.history().len(), "chat reply recorded");
                AgentResponse::reply(reply)
            }
            Err(e) => {
                warn!(user_id, error = %e, "chat completion failed");
                AgentResponse::error(CHAT_FAILED)
            }
        }
    }
}
