// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation memory.
//!
//! Each user id owns an append-only transcript behind its own async mutex.
//! Operations on different users never contend beyond the brief shard lock
//! used to find the transcript; operations on the same user are serialized.
//! A chat exchange that must read history and append two turns atomically
//! holds a [`UserSession`] for its whole duration.

use std::sync::Arc;

use dashmap::DashMap;
use sairen_config::model::MemoryConfig;
use sairen_core::ChatMessage;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

type Transcript = Arc<Mutex<Vec<ChatMessage>>>;

/// Process-wide store of per-user transcripts.
///
/// Cloning is cheap; clones share the same transcripts.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    transcripts: Arc<DashMap<String, Transcript>>,
    max_turns_per_user: Option<usize>,
}

impl ConversationMemory {
    /// Unbounded memory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MemoryConfig) -> Self {
        Self {
            transcripts: Arc::default(),
            max_turns_per_user: config.max_turns_per_user,
        }
    }

    /// Appends one turn to `user_id`'s transcript, creating it on first use.
    pub async fn append(&self, user_id: &str, turn: ChatMessage) {
        self.session(user_id).await.append(turn);
    }

    /// All turns recorded for `user_id`, oldest first. Empty for unknown users.
    pub async fn history(&self, user_id: &str) -> Vec<ChatMessage> {
        let transcript = self.transcripts.get(user_id).map(|t| Arc::clone(&t));
        match transcript {
            Some(transcript) => transcript.lock().await.clone(),
            None => Vec::new(),
        }
    }

    /// Locks `user_id`'s transcript until the returned session is dropped.
    ///
    /// Other calls for the same user wait; calls for other users proceed.
    pub async fn session(&self, user_id: &str) -> UserSession {
        let transcript = Arc::clone(
            &self
                .transcripts
                .entry(user_id.to_string())
                .or_default(),
        );
        UserSession {
            user_id: user_id.to_string(),
            turns: transcript.lock_owned().await,
            max_turns: self.max_turns_per_user,
        }
    }

    /// Number of users with a transcript.
    pub fn user_count(&self) -> usize {
        self.transcripts.len()
    }
}

/// Exclusive access to one user's transcript.
pub struct UserSession {
    user_id: String,
    turns: OwnedMutexGuard<Vec<ChatMessage>>,
    max_turns: Option<usize>,
}

impl UserSession {
    pub fn append(&mut self, turn: ChatMessage) {
        self.turns.push(turn);
        if let Some(max) = self.max_turns {
            let excess = self.turns.len().saturating_sub(max);
            if excess > 0 {
                self.turns.drain(..excess);
                debug!(user_id = %self.user_id, dropped = excess, "trimmed conversation history");
            }
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
