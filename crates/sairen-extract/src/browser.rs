// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless browser page fetcher.
//!
//! Launches a fresh Chromium instance per fetch, navigates to the page, waits
//! for the load event and then for network activity to go quiet, and returns
//! the document markup. The browser is shut down on every path, including
//! navigation failures and timeouts.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::time::Instant;
use sairen_core::traits::{PageFetcher, PluginAdapter};
use sairen_core::SairenError;
use tracing::{debug, warn};

/// No new resource may finish loading for this long before the page is idle.
const NETWORK_QUIET: Duration = Duration::from_millis(500);

const IDLE_POLL: Duration = Duration::from_millis(100);

/// Number of resources the page has finished loading so far.
const RESOURCE_COUNT: &str = "performance.getEntriesByType('resource').length";

/// Tracks how long a page's finished-resource count has held steady.
#[derive(Debug)]
struct QuietWindow {
    last: Option<u64>,
    since: Instant,
}

impl QuietWindow {
    fn new(now: Instant) -> Self {
        Self { last: None, since: now }
    }

    /// Records a sample; true once the count has not moved for `NETWORK_QUIET`.
    fn observe(&mut self, count: u64, now: Instant) -> bool {
        if self.last != Some(count) {
            self.last = Some(count);
            self.since = now;
            return false;
        }
        now.duration_since(self.since) >= NETWORK_QUIET
    }
}

/// Fetches rendered markup through a headless Chromium.
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    timeout: Duration,
}

impl BrowserFetcher {
    /// Creates a fetcher whose navigation gives up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn render(browser: &mut Browser, url: &str) -> Result<String, SairenError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| browser_error(url, "navigation failed", e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| browser_error(url, "page did not settle", e))?;
        Self::wait_for_network_idle(&page, url).await?;
        page.content()
            .await
            .map_err(|e| browser_error(url, "failed to read document", e))
    }

    /// Polls until no resource has finished loading for `NETWORK_QUIET`.
    ///
    /// Unbounded on its own; the caller's timeout caps it.
    async fn wait_for_network_idle(page: &Page, url: &str) -> Result<(), SairenError> {
        let mut window = QuietWindow::new(Instant::now());
        loop {
            let count = page
                .evaluate(RESOURCE_COUNT)
                .await
                .map_err(|e| browser_error(url, "failed to inspect network activity", e))?
                .value()
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            if window.observe(count, Instant::now()) {
                debug!(url, resources = count, "network idle");
                return Ok(());
            }
            tokio::time::sleep(IDLE_POLL).await;
        }
    }
}

impl PluginAdapter for BrowserFetcher {
    fn name(&self) -> &str {
        "browser"
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SairenError> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| SairenError::fetch(url, format!("invalid browser config: {e}")))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| browser_error(url, "failed to launch browser", e))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let rendered = match tokio::time::timeout(self.timeout, Self::render(&mut browser, url)).await
        {
            Ok(result) => result,
            Err(_) => Err(SairenError::Timeout {
                duration: self.timeout,
            }),
        };

        if let Err(e) = browser.close().await {
            warn!(url, error = %e, "failed to close browser");
        }
        if let Err(e) = browser.wait().await {
            warn!(url, error = %e, "browser process did not exit cleanly");
        }
        events.abort();
        debug!(url, ok = rendered.is_ok(), "browser fetch finished");

        rendered
    }
}

fn browser_error(
    url: &str,
    message: &str,
    source: chromiumoxide::error::CdpError,
) -> SairenError {
    SairenError::Fetch {
        url: url.to_string(),
        message: format!("{message}: {source}"),
        source: Some(Box::new(source)),
    }
}
