//! Capability traits consumed by the engine components
//!
//! Each trait models one external collaborator. Concrete implementations
//! live in `insight-engine/src/api/` and `insight-llm`; tests substitute
//! mockall mocks.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{PricePoint, SearchHit, SentimentLabel};

/// Structured output of a classification backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub similarity_score: Option<f64>,
    /// Short summary of the classified text; the caller substitutes a
    /// truncation of the source text when absent
    pub summary: Option<String>,
}

/// Trait for web search providers
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query and return up to `max_results` hits
    ///
    /// Implementations degrade to an empty vec on failure rather than
    /// propagating transport errors.
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit>;
}

/// Trait for fetching readable text from a web page
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch a page and return its tag-stripped text, capped in length
    ///
    /// Returns an empty string when the page cannot be fetched or yields
    /// no usable text.
    async fn fetch_text(&self, url: &str) -> String;
}

/// Trait for market data providers
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch daily closing prices for `symbol` between `start` and `end`
    async fn price_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>>;

    /// Check whether `symbol` is live by fetching a minimal history window
    ///
    /// Any provider error counts as a failed probe.
    async fn probe_symbol(&self, symbol: &str) -> bool;
}

/// Trait for AI-backed classification and extraction
#[async_trait]
pub trait InsightClassifier: Send + Sync {
    /// Classify `text` for sentiment toward the products of `company_name`
    async fn classify(&self, company_name: &str, text: &str) -> Result<Classification>;

    /// Extract a ticker symbol for `company_name` from search-result context
    ///
    /// `Ok(None)` means the backend answered but found no symbol.
    async fn extract_symbol(&self, company_name: &str, context: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_optional_fields() {
        let json = r#"{"sentiment_score": -0.3, "sentiment_label": "negative"}"#;
        let c: Classification = serde_json::from_str(json).unwrap();
        assert_eq!(c.sentiment_label, SentimentLabel::Negative);
        assert!(c.similarity_score.is_none());
        assert!(c.summary.is_none());
    }
}
