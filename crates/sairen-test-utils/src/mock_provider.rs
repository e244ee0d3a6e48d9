// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sairen_core::traits::adapter::PluginAdapter;
use sairen_core::traits::provider::ProviderAdapter;
use sairen_core::types::{CompletionRequest, CompletionResponse};
use sairen_core::SairenError;

/// A scripted outcome for one `complete` call.
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Failure(String),
}

/// A mock completion provider that returns pre-configured replies.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, the
/// default reply is returned (`"mock response"` unless overridden). Every
/// request is recorded for later assertion.
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    default_reply: Option<String>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            default_reply: Some("mock response".to_string()),
            delay: None,
        }
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        let queue = replies
            .into_iter()
            .map(|r| Scripted::Reply(r.into()))
            .collect();
        Self {
            script: Arc::new(Mutex::new(queue)),
            ..provider
        }
    }

    /// A provider whose every call fails.
    pub fn failing() -> Self {
        Self {
            default_reply: None,
            ..Self::new()
        }
    }

    /// Sleep this long inside every call, to widen race windows in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Reply(text.into()));
    }

    /// Queue a failure; the matching call returns a provider error.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Failure(message.into()));
    }

    /// All requests received so far, in call order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `complete` calls received.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_outcome(&self) -> Scripted {
        match self.script.lock().await.pop_front() {
            Some(outcome) => outcome,
            None => match &self.default_reply {
                Some(text) => Scripted::Reply(text.clone()),
                None => Scripted::Failure("mock provider unavailable".to_string()),
            },
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, SairenError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| "mock-model".to_string());
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_outcome().await {
            Scripted::Reply(content) => Ok(CompletionResponse { content, model }),
            Scripted::Failure(message) => Err(SairenError::provider(message)),
        }
    }
}
