//! Page content fetcher

use crate::error::{EngineError, Result};
use async_trait::async_trait;
use insight_core::ContentFetcher;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
        .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Fetches a web page and reduces it to plain text
///
/// Scripts, styles, and markup are stripped; the remaining text is
/// whitespace-collapsed and capped at `max_chars`.
pub struct PageFetcher {
    client: Client,
    max_chars: usize,
}

impl PageFetcher {
    /// Create a new page fetcher
    ///
    /// # Arguments
    /// * `timeout` - Per-request timeout
    /// * `max_chars` - Maximum characters of extracted text to keep
    pub fn new(timeout: Duration, max_chars: usize) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_chars })
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("user-agent", USER_AGENT)
            .header("accept-language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| EngineError::FetchFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(EngineError::FetchFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::FetchFailed(format!("body read failed: {e}")))?;

        Ok(extract_text(&body, self.max_chars))
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_text(&self, url: &str) -> String {
        match self.fetch_page(url).await {
            Ok(text) => {
                debug!("Fetched {} chars", text.len());
                text
            }
            Err(e) => {
                warn!("Fetch failed for {url}: {e}");
                String::new()
            }
        }
    }
}

/// Strip markup from an HTML document and cap the resulting text
fn extract_text(html: &str, max_chars: usize) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_tags = TAG_RE.replace_all(&without_scripts, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_tags, " ");
    let text = collapsed.trim();

    truncate_chars(text, max_chars)
}

/// Truncate on a character boundary
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
