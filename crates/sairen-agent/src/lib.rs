// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action dispatch for the Sai Ren assistant.
//!
//! The [`Agent`] is the central coordinator that:
//! - Classifies each request into an [`ActionLabel`]
//! - Hands it to exactly one handler (chat, search, order lookup)
//! - Returns a uniform [`AgentResponse`] whatever happened upstream
//!
//! Handler failures never escape as errors; each handler converts them into
//! its own fallback body.

pub mod handlers;
pub mod page;
pub mod reply;
pub mod response;

use std::sync::Arc;

use sairen_config::model::SairenConfig;
use sairen_context::ReferenceCache;
use sairen_core::traits::ProviderAdapter;
use sairen_core::SairenError;
use sairen_memory::ConversationMemory;
use sairen_router::{ActionLabel, IntentClassifier};
use tracing::info;

pub use handlers::{ChatHandler, OrderHandler, SearchHandler};
pub use page::PageAssistant;
pub use response::AgentResponse;

/// Returned for the `extract-text` action, which is served only by the
/// dedicated extraction endpoint.
pub const EXTRACT_TEXT_NOTICE: &str = "Text extraction is handled in the backend.";

/// Classifier plus one handler per action.
pub struct Agent {
    classifier: IntentClassifier,
    chat: ChatHandler,
    search: SearchHandler,
    orders: OrderHandler,
    page: PageAssistant,
}

impl Agent {
    /// Wires every handler to the shared provider, memory, and cache.
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        memory: ConversationMemory,
        references: ReferenceCache,
        config: &SairenConfig,
    ) -> Result<Self, SairenError> {
        let persona = config
            .agent
            .persona
            .clone()
            .unwrap_or_else(|| handlers::chat::default_persona(&config.agent.name));

        Ok(Self {
            classifier: IntentClassifier::new(provider.clone()),
            chat: ChatHandler::new(provider.clone(), memory, references, persona.clone()),
            search: SearchHandler::new(provider.clone(), &config.search)?,
            orders: OrderHandler::new(provider.clone(), config.orders.clone()),
            page: PageAssistant::new(provider, persona),
        })
    }

    /// Classifies `input` and dispatches it.
    pub async fn respond(&self, input: &str, user_id: &str) -> AgentResponse {
        let action = self.classifier.classify(input).await;
        info!(user_id, action = %action, "dispatching request");
        self.dispatch(action, input, user_id).await
    }

    /// Runs the handler for `action`.
    pub async fn dispatch(&self, action: ActionLabel, input: &str, user_id: &str) -> AgentResponse {
        match action {
            ActionLabel::Chat => self.chat.chat(input, user_id).await,
            ActionLabel::ExtractText => AgentResponse::error(EXTRACT_TEXT_NOTICE),
            ActionLabel::Search => self.search.search(input).await,
            ActionLabel::CheckOrder => self.orders.check_order(input, user_id).await,
        }
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    pub fn page(&self) -> &PageAssistant {
        &self.page
    }
}
