//! Domain types shared across the insight engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single web search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Where a candidate ticker symbol was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// The company name itself already looked like a ticker
    Direct,
    /// Extracted from search results via pattern rules
    PatternExtracted,
    /// Proposed by the AI extraction backend
    AiExtracted,
    /// Surfaced by frequency ranking over search-result tokens
    FrequencyRanked,
}

/// An unverified candidate ticker symbol
///
/// Candidates are transient resolver state; they become durable only after
/// a live market-data probe promotes them to a [`ValidatedSymbol`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSymbol {
    pub text: String,
    pub source: CandidateSource,
}

/// A probe-verified market identifier
///
/// `symbol` is the exact string the probe succeeded for, regional suffix
/// included. `exchange_suffix` records which suffix matched, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedSymbol {
    pub symbol: String,
    pub exchange_suffix: Option<String>,
}

impl ValidatedSymbol {
    /// A symbol validated in its bare form, with no regional suffix
    pub fn bare(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exchange_suffix: None,
        }
    }

    /// A symbol validated with a regional exchange suffix appended
    pub fn with_suffix(base: &str, suffix: &str) -> Self {
        Self {
            symbol: format!("{base}{suffix}"),
            exchange_suffix: Some(suffix.to_string()),
        }
    }
}

/// A single daily closing price observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Seasonal trend statistics over a historical price series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub symbol: String,
    pub period_years: u32,
    /// Percent change from the first to the last observation in the series
    pub overall_change_percent: f64,
    /// English name of the month with the lowest mean close
    pub typical_dip_month: String,
    /// English name of the month with the highest mean close
    pub typical_peak_month: String,
    pub latest_price: f64,
    pub data_point_count: usize,
}

/// Sentiment polarity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(text)
    }
}

/// Classification of a single scraped product-review source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInsight {
    pub title: String,
    pub link: String,
    /// Polarity in [-1.0, 1.0]
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    /// Relevance in [0.0, 1.0]; absent when the backend cannot judge it
    pub similarity_score: Option<f64>,
    pub summary: String,
}

/// Bundle of fixed-query research results for a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyResearch {
    pub news: Vec<SearchHit>,
    pub products: Vec<SearchHit>,
    pub research: Vec<SearchHit>,
    pub sales: Vec<SearchHit>,
}
