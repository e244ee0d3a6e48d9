// SPDX-FileCopyrightText: 2026 Sai Ren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web page content extraction for the Sai Ren assistant.
//!
//! A [`ContentExtractor`] combines a pluggable [`PageFetcher`] (plain HTTP or
//! a headless browser) with DOM text selection and cleaning. Callers that
//! only care whether content exists use [`ContentExtractor::extract`], which
//! logs failures and returns `None`; the gateway uses
//! [`ContentExtractor::try_extract`] to report the cause.

pub mod clean;
pub mod fetch;
pub mod html;

#[cfg(feature = "browser")]
pub mod browser;

use std::sync::Arc;
use std::time::Duration;

use sairen_config::model::{ExtractConfig, RendererKind, SelectionMode};
use sairen_core::SairenError;
use sairen_core::traits::{PageFetcher, PluginAdapter};
use tracing::{debug, warn};

pub use clean::clean_text;
pub use fetch::HttpFetcher;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;

/// Fetches pages and reduces them to cleaned plain text.
#[derive(Clone)]
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    selection: SelectionMode,
    min_block_chars: usize,
}

impl ContentExtractor {
    /// Creates an extractor over an explicit fetcher.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        selection: SelectionMode,
        min_block_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            selection,
            min_block_chars,
        }
    }

    /// Builds the extractor described by `[extract]`.
    ///
    /// Fails with [`SairenError::Config`] when the browser renderer is
    /// requested but this build lacks the `browser` feature.
    pub fn from_config(config: &ExtractConfig) -> Result<Self, SairenError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let fetcher: Arc<dyn PageFetcher> = match config.renderer {
            RendererKind::Static => Arc::new(HttpFetcher::new(timeout)?),
            RendererKind::Browser => browser_fetcher(timeout)?,
        };
        Ok(Self::new(fetcher, config.selection, config.min_block_chars))
    }

    /// Name of the underlying fetcher ("http", "browser", ...).
    pub fn fetcher_name(&self) -> &str {
        self.fetcher.name()
    }

    /// Fetches `url` and returns its cleaned text.
    ///
    /// A page that yields no text after selection is an error, so callers
    /// never receive an empty blob.
    pub async fn try_extract(&self, url: &str) -> Result<String, SairenError> {
        let markup = self.fetcher.fetch(url).await?;
        let text = html::extract_text(&markup, self.selection, self.min_block_chars);
        debug!(url, fetcher = self.fetcher_name(), chars = text.len(), "page text selected");
        if text.is_empty() {
            return Err(SairenError::fetch(url, "page contained no extractable text"));
        }
        Ok(text)
    }

    /// Like [`try_extract`](Self::try_extract), but every failure becomes
    /// `None` after being logged.
    pub async fn extract(&self, url: &str) -> Option<String> {
        match self.try_extract(url).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(url, fetcher = self.fetcher_name(), error = %e, "content extraction failed");
                None
            }
        }
    }
}

#[cfg(feature = "browser")]
fn browser_fetcher(timeout: Duration) -> Result<Arc<dyn PageFetcher>, SairenError> {
    Ok(Arc::new(BrowserFetcher::new(timeout)))
}

#[cfg(not(feature = "browser"))]
fn browser_fetcher(_timeout: Duration) -> Result<Arc<dyn PageFetcher>, SairenError> {
    Err(SairenError::Config(
        "extract.renderer = \"browser\" requires building with the `browser` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sairen_test_utils::MockFetcher;

    const ABOUT: &str = "<html><body><nav>Home</nav>\
        <p>Sai Ren ships orders within two business days.</p></body></html>";

    fn extractor(fetcher: MockFetcher) -> ContentExtractor {
        ContentExtractor::new(Arc::new(fetcher), SelectionMode::Candidates, 20)
    }

    #[tokio::test]
    async fn extract_returns_selected_text() {
        let ex = extractor(MockFetcher::new().with_page("https://a.test/", ABOUT));
        assert_eq!(
            ex.extract("https://a.test/").await.as_deref(),
            Some("Sai Ren ships orders within two business days.")
        );
    }

    #[tokio::test]
    async fn fetch_failure_is_none() {
        let ex = extractor(MockFetcher::new().with_failure("https://a.test/", "reset"));
        assert!(ex.extract("https://a.test/").await.is_none());
    }

    #[tokio::test]
    async fn empty_selection_is_an_error() {
        let ex = extractor(MockFetcher::new().with_page("https://a.test/", "<nav>Home</nav>"));
        let err = ex.try_extract("https://a.test/").await.unwrap_err();
        assert!(err.to_string().contains("no extractable text"));
        assert!(ex.extract("https://a.test/").await.is_none());
    }

    #[test]
    fn static_renderer_builds_http_fetcher() {
        let ex = ContentExtractor::from_config(&ExtractConfig::default()).unwrap();
        assert_eq!(ex.fetcher_name(), "http");
    }

    #[cfg(not(feature = "browser"))]
    #[test]
    fn browser_renderer_needs_feature() {
        let config = ExtractConfig {
            renderer: RendererKind::Browser,
            ..ExtractConfig::default()
        };
        let err = ContentExtractor::from_config(&config).err().unwrap();
        assert!(matches!(err, SairenError::Config(_)));
    }
}
