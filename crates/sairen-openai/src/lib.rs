// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider for the Sai Ren assistant.
//!
//! This crate implements [`ProviderAdapter`] on top of the Chat Completions
//! API. Every Sai Ren component that talks to the model (classifier,
//! handlers, suggestions) goes through this single adapter.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use sairen_config::model::OpenAiConfig;
use sairen_core::traits::{PluginAdapter, ProviderAdapter};
use sairen_core::{CompletionRequest, CompletionResponse, SairenError};
use tracing::info;

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatCompletionRequest};

/// Completion provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a new provider from the given configuration.
    ///
    /// Fails with [`SairenError::Config`] when no API key is available, so a
    /// misconfigured deployment stops before accepting traffic.
    pub fn new(config: &OpenAiConfig) -> Result<Self, SairenError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )?;

        info!(model = config.model, "completion provider initialized");

        Ok(Self { client })
    }

    /// Converts a [`CompletionRequest`] to the wire request.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.client.default_model().to_string()),
            messages: request
                .messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
        }
    }
}

impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, SairenError> {
        let wire = self.to_wire_request(&request);
        let response = self.client.create_chat_completion(&wire).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SairenError::provider("completion response contained no text"))?;

        Ok(CompletionResponse {
            content,
            model: response.model,
        })
    }
}

/// Resolves the API key from config or the `OPENAI_API_KEY` environment variable.
fn resolve_api_key(configured: Option<&str>) -> Result<String, SairenError> {
    if let Some(key) = configured.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            SairenError::Config(
                "no completion API key: set openai.api_key, API_KEY, or OPENAI_API_KEY"
                    .to_string(),
            )
        })
}
