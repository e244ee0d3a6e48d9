// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for completion service integrations.

use async_trait::async_trait;

use crate::error::SairenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for the external chat-completion service.
///
/// Implementations may fail for any reason (timeout, quota, malformed
/// response). Every call site is expected to convert the error into a
/// domain fallback rather than abort the request.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends an ordered message list and returns the single generated reply.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, SairenError>;
}
