// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform JSON body returned for every dispatched request.

use serde::Serialize;

use crate::handlers::search::SearchResultItem;

/// One handler outcome. Serializes without a tag, so each variant is exactly
/// the JSON object a client sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgentResponse {
    /// `{reply, results}` from the search handler.
    Search {
        reply: String,
        results: Vec<SearchResultItem>,
    },
    /// `{orderId, reply}` from the order handler; `orderId` is `null` when no
    /// id was found or the lookup failed.
    Order {
        #[serde(rename = "orderId")]
        order_id: Option<String>,
        reply: String,
    },
    /// `{reply}` from the chat handler.
    Reply { reply: String },
    /// `{error}` for a handled failure. Still a 200 at the HTTP layer.
    Error { error: String },
}

impl AgentResponse {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self::Reply {
            reply: reply.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    /// The human-readable text, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Self::Search { reply, .. } | Self::Order { reply, .. } | Self::Reply { reply } => reply,
            Self::Error { error } => error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
