// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Page fetcher trait: the pluggable markup retrieval step of extraction.

use async_trait::async_trait;

use crate::error::SairenError;
use crate::traits::adapter::PluginAdapter;

/// Retrieves the markup of a web page.
///
/// A plain HTTP fetcher returns the raw response body; a rendering fetcher
/// drives a headless browser and returns the document after scripts ran.
#[async_trait]
pub trait PageFetcher: PluginAdapter {
    /// Returns the page markup for `url`.
    async fn fetch(&self, url: &str) -> Result<String, SairenError>;
}
