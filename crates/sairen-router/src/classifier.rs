// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion-backed intent classification.
//!
//! One completion call per request. The reply is never trusted: it is decoded
//! with [`ActionLabel::decode`], and a failed call yields `chat` so every
//! request still gets an answer.

use std::sync::Arc;

use sairen_core::traits::ProviderAdapter;
use sairen_core::CompletionRequest;
use tracing::{debug, warn};

use crate::label::ActionLabel;

/// Routes free-form user text to an [`ActionLabel`].
#[derive(Clone)]
pub struct IntentClassifier {
    provider: Arc<dyn ProviderAdapter>,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>) -> Self {
        Self { provider }
    }

    /// The instruction sent for `input`.
    pub fn prompt(input: &str) -> String {
        format!(
            "Given the following user input: \"{input}\", determine the most appropriate action \
             from these options: {}. Note if you are not sure of the action, respond with \"chat\". \
             Respond with only the action name.",
            ActionLabel::quoted_list()
        )
    }

    /// Classifies `input`, failing closed to [`ActionLabel::Chat`].
    pub async fn classify(&self, input: &str) -> ActionLabel {
        match self
            .provider
            .complete(CompletionRequest::prompt(Self::prompt(input)))
            .await
        {
            Ok(response) => {
                let label = ActionLabel::decode(&response.content);
                debug!(raw = %response.content.trim(), action = %label, "intent classified");
                label
            }
            Err(e) => {
                warn!(error = %e, "intent classification failed, defaulting to chat");
                ActionLabel::Chat
            }
        }
    }
}
