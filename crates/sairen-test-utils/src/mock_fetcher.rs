// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock page fetcher serving canned markup per URL.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sairen_core::traits::adapter::PluginAdapter;
use sairen_core::traits::fetcher::PageFetcher;
use sairen_core::SairenError;

/// A page fetcher backed by an in-memory URL map.
///
/// Unknown URLs fail with a fetch error, as does any URL registered with
/// [`MockFetcher::with_failure`]. Fetched URLs are captured in call order.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, String>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(markup.into()));
        self
    }

    /// Fail every fetch of `url` with `message`.
    pub fn with_failure(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Err(message.into()));
        self
    }

    /// URLs fetched so far, in call order.
    pub async fn fetched(&self) -> Vec<String> {
        self.fetched.lock().await.clone()
    }
}

impl PluginAdapter for MockFetcher {
    fn name(&self) -> &str {
        "mock-fetcher"
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SairenError> {
        self.fetched.lock().await.push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(markup)) => Ok(markup.clone()),
            Some(Err(message)) => Err(SairenError::fetch(url, message.clone())),
            None => Err(SairenError::fetch(url, "no such page")),
        }
    }
}
