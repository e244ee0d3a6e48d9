// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sai Ren assistant.
//!
//! This crate provides the error type, the message types exchanged with the
//! completion service, and the adapter traits every external collaborator
//! implements.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SairenError;
pub use types::{ChatMessage, CompletionRequest, CompletionResponse, Role};

pub use traits::{PageFetcher, PluginAdapter, ProviderAdapter};
