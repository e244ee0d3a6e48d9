// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference content cache for Sai Ren chat prompts.
//!
//! The cache maps a logical source name ("FAQ") to the cleaned text of the
//! configured page. It is filled once at startup by [`ReferenceCache::populate`]
//! and read on every chat turn through [`ReferenceCache::snapshot`] or
//! [`ReferenceCache::render_context`]. Requests served before population
//! finishes simply see fewer entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use sairen_config::model::ReferenceConfig;
use sairen_extract::ContentExtractor;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Process-wide mapping of source name to cleaned page text.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts every reference concurrently and stores the ones that
    /// produced text. Failed URLs are logged and skipped.
    ///
    /// Returns the number of entries stored by this call.
    pub async fn populate(
        &self,
        references: &[ReferenceConfig],
        extractor: &ContentExtractor,
    ) -> usize {
        let results = join_all(references.iter().map(|reference| async move {
            (reference, extractor.extract(&reference.url).await)
        }))
        .await;

        let mut stored = 0;
        for (reference, text) in results {
            match text {
                Some(text) => {
                    info!(name = %reference.name, chars = text.len(), "reference content extracted");
                    self.insert(&reference.name, text).await;
                    stored += 1;
                }
                None => {
                    error!(name = %reference.name, url = %reference.url, "failed to extract reference content");
                }
            }
        }
        stored
    }

    /// Stores `content` under `name`, replacing any previous entry.
    pub async fn insert(&self, name: impl Into<String>, content: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(name.into(), content.into());
    }

    /// A copy of the current entries, ordered by name.
    pub async fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.read().await.clone()
    }

    /// Entries rendered as `From {name}: {content}` blocks separated by a
    /// blank line. Empty when nothing has been populated.
    pub async fn render_context(&self) -> String {
        render(&self.snapshot().await)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Flattens a snapshot into prompt text.
pub fn render(entries: &BTreeMap<String, String>) -> String {
    entries
        .iter()
        .map(|(name, content)| format!("From {name}: {content}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
