// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Sai Ren assistant.
//!
//! Routes:
//! - `POST /ai-agent` classify and dispatch `{input, userId}`
//! - `POST /extract-text` extract `{url}` behind the admission gate
//! - `POST /chat` answer `{message, pageContent}` without memory
//! - `GET /health`

pub mod gate;
pub mod handlers;
pub mod server;

pub use gate::{ExtractionGate, GatePermit};
pub use server::{AppState, ServerConfig, router, start_server};
