// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sai Ren integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests without
//! external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Completion provider with scripted replies and failures
//! - [`MockFetcher`] - Page fetcher serving canned markup per URL

pub mod mock_fetcher;
pub mod mock_provider;

pub use mock_fetcher::MockFetcher;
pub use mock_provider::MockProvider;
