// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all external-service adapters implement.

/// The base trait for Sai Ren adapters.
///
/// Every adapter (completion provider, page fetcher) names itself so
/// startup and extraction logs show which implementation is wired in.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;
}
