// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-action request handlers.

pub mod chat;
pub mod order;
pub mod search;

pub use chat::ChatHandler;
pub use order::OrderHandler;
pub use search::SearchHandler;
