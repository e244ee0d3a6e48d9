// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing for the Sai Ren assistant.
//!
//! This crate provides:
//! - [`ActionLabel`]: the closed set of actions a request can be routed to,
//!   with a decode step that maps any unrecognized text to `chat`
//! - [`IntentClassifier`]: asks the completion service which action fits a
//!   user message, failing closed to `chat`

pub mod classifier;
pub mod label;

pub use classifier::IntentClassifier;
pub use label::ActionLabel;
