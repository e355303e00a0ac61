//! DuckDuckGo HTML search client

use crate::error::{EngineError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use insight_core::{SearchHit, SearchProvider};
use regex::Regex;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::{Arc, LazyLock};
use tracing::{instrument, warn};
use url::Url;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

static RESULT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("valid regex")
});
static SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#).expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Web search client backed by DuckDuckGo's HTML endpoint
///
/// No API key required. Requests are rate limited client-side to stay
/// polite with the endpoint.
pub struct DuckDuckGoClient {
    client: Client,
    rate_limiter: SharedRateLimiter,
}

impl DuckDuckGoClient {
    /// Create a new search client with rate limiting
    ///
    /// # Arguments
    /// * `rate_limit` - Requests per minute
    pub fn new(rate_limit: u32) -> Self {
        let per_minute = NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            client: Client::new(),
            rate_limiter,
        }
    }

    async fn fetch_results(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query)])
            .header("user-agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| EngineError::SearchFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(EngineError::SearchFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EngineError::SearchFailed(format!("body read failed: {e}")))?;

        Ok(parse_results(&body, max_results))
    }
}

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new(30)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit> {
        match self.fetch_results(query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search failed for '{query}': {e}");
                Vec::new()
            }
        }
    }
}

fn parse_results(body: &str, max_results: usize) -> Vec<SearchHit> {
    let snippets: Vec<String> = SNIPPET_RE
        .captures_iter(body)
        .map(|c| clean_fragment(&c[1]))
        .collect();

    RESULT_LINK_RE
        .captures_iter(body)
        .enumerate()
        .take(max_results)
        .map(|(i, c)| SearchHit {
            title: clean_fragment(&c[2]),
            link: decode_redirect(&c[1]),
            snippet: snippets.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Strip markup and decode the common HTML entities
fn clean_fragment(fragment: &str) -> String {
    let text = TAG_RE.replace_all(fragment, "");
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Resolve DuckDuckGo's redirect links back to the target URL
fn decode_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        if parsed.path().starts_with("/l/") {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
    }

    absolute
}
