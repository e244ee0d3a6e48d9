// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sai Ren assistant.

use thiserror::Error;

/// The primary error type used across all Sai Ren crates.
#[derive(Debug, Error)]
pub enum SairenError {
    /// Configuration errors (invalid TOML, missing credentials, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion service errors (transport failure, quota, malformed reply).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Page fetch or render failure for a specific URL.
    #[error("fetch error for {url}: {message}")]
    Fetch {
        url: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Product search service errors.
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An inbound request was missing required fields or malformed.
    #[error("{0}")]
    Validation(String),

    /// An admission gate is held and the caller must retry later.
    #[error("server is busy, please try again later")]
    Busy,

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SairenError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        SairenError::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a fetch error without an underlying source.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        SairenError::Fetch {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }
}
