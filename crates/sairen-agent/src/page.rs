// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless helpers for page-scoped requests: follow-up suggestions for an
//! extracted page, and chat grounded in caller-supplied page content.

use std::sync::Arc;

use sairen_core::traits::ProviderAdapter;
use sairen_core::{ChatMessage, CompletionRequest, SairenError};
use tracing::warn;

use crate::reply::clean_reply;

/// Suggestion text used when the completion call fails.
pub const SUGGESTIONS_FALLBACK: &str = "Error generating content";

#[derive(Clone)]
pub struct PageAssistant {
    provider: Arc<dyn ProviderAdapter>,
    persona: String,
}

impl PageAssistant {
    pub fn new(provider: Arc<dyn ProviderAdapter>, persona: String) -> Self {
        Self { provider, persona }
    }

    pub fn suggestions_prompt(page_text: &str) -> String {
        format!(
            "Based on the following page content, suggest three short follow-up questions a \
             visitor might ask. Respond with plain text only: \"{page_text}\""
        )
    }

    /// Follow-up suggestions for an extracted page. Never fails.
    pub async fn suggestions(&self, page_text: &str) -> String {
        match self
            .provider
            .complete(CompletionRequest::prompt(Self::suggestions_prompt(page_text)))
            .await
        {
            Ok(response) => response.content,
            Err(e) => {
                warn!(error = %e, "suggestion generation failed");
                SUGGESTIONS_FALLBACK.to_string()
            }
        }
    }

    /// Answers `message` using only `page_content`. Nothing is remembered.
    pub async fn page_chat(&self, message: &str, page_content: &str) -> Result<String, SairenError> {
        let messages = vec![
            ChatMessage::system(&self.persona),
            ChatMessage::system(format!(
                "Answer using only the following page content: \"{page_content}\""
            )),
            ChatMessage::user(message),
        ];
        let response = self.provider.complete(CompletionRequest::new(messages)).await?;
        Ok(clean_reply(&response.content))
    }
}
