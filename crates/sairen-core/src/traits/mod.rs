// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod fetcher;
pub mod provider;

pub use adapter::PluginAdapter;
pub use fetcher::PageFetcher;
pub use provider::ProviderAdapter;
