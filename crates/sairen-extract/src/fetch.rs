// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain HTTP page fetcher.
//!
//! Returns the raw response body without running scripts. Client-rendered
//! pages yield little text this way; use the browser renderer for those.

use std::time::Duration;

use async_trait::async_trait;
use sairen_core::traits::{PageFetcher, PluginAdapter};
use sairen_core::SairenError;
use tracing::debug;

const USER_AGENT: &str = concat!("sairen/", env!("CARGO_PKG_VERSION"));

/// Fetches page markup with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SairenError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SairenError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }
}

impl PluginAdapter for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SairenError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| SairenError::fetch(url, format!("invalid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SairenError::fetch(
                url,
                format!("URL scheme '{}' not allowed", parsed.scheme()),
            ));
        }

        let response = self.client.get(parsed).send().await.map_err(|e| {
            if e.is_timeout() {
                SairenError::Timeout {
                    duration: self.timeout,
                }
            } else {
                SairenError::Fetch {
                    url: url.to_string(),
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let status = response.status();
        debug!(url, status = %status, "page response received");
        if !status.is_success() {
            return Err(SairenError::fetch(url, format!("HTTP {status}")));
        }

        response.text().await.map_err(|e| SairenError::Fetch {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
