//! Configuration for the insight engine

use insight_core::{InsightError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// LLM backend for classification and ticker extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmKind {
    /// Google Gemini (generateContent API)
    Gemini,
    /// OpenAI-compatible chat completions API
    OpenAi,
}

/// Settings for the optional LLM backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Which provider to use
    pub kind: LlmKind,
    /// Model identifier, e.g. "gemini-2.0-flash"
    pub model: String,
}

/// Configuration for the insight engine components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Total time budget for identifier resolution
    pub resolve_budget: Duration,

    /// Regional exchange suffixes tried after the bare symbol
    pub regional_suffixes: Vec<String>,

    /// Results requested per ticker-search query
    pub ticker_search_results: usize,

    /// Results requested for the sentiment product search
    pub sentiment_search_results: usize,

    /// Concurrent workers in the sentiment fan-out
    pub worker_width: usize,

    /// Timeout for a single page fetch
    pub scrape_timeout: Duration,

    /// Maximum characters kept from a fetched page
    pub scrape_max_chars: usize,

    /// Minimum characters for fetched content to be usable
    pub min_content_chars: usize,

    /// Maximum characters in a fallback summary
    pub summary_max_chars: usize,

    /// Result cap for the monthly-events search
    pub monthly_events_max_results: usize,

    /// Uppercase tokens excluded from frequency ranking
    pub noise_words: HashSet<String>,

    /// Optional LLM backend; absent means lexical fallback only
    pub llm: Option<LlmSettings>,
}

const DEFAULT_NOISE_WORDS: &[&str] = &[
    "THE", "FOR", "AND", "INC", "CORP", "LTD", "PLC", "USD", "COM", "PRICE", "QUOTE", "STOCK",
    "SYMBOL", "TICKER", "MARKET", "SHARE", "TRADE", "VALUE", "CLOSE", "OPEN", "HIGH", "LOW", "VOL",
    "DATE", "TIME", "YEAR", "MONTH", "WEEK", "DAY", "EXCHA", "TRADI", "TICKE", "SYMBO", "CHANGE",
    "PERCENT", "COMPAN", "GROUP", "INDIA", "BANK",
];

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            resolve_budget: Duration::from_secs(20),
            regional_suffixes: vec![".NS".to_string(), ".BO".to_string()],
            ticker_search_results: 2,
            sentiment_search_results: 5,
            worker_width: 5,
            scrape_timeout: Duration::from_secs(5),
            scrape_max_chars: 15_000,
            min_content_chars: 100,
            summary_max_chars: 300,
            monthly_events_max_results: 20,
            noise_words: DEFAULT_NOISE_WORDS.iter().map(ToString::to_string).collect(),
            llm: None,
        }
    }
}

impl InsightConfig {
    /// Create a new configuration builder
    pub fn builder() -> InsightConfigBuilder {
        InsightConfigBuilder::default()
    }

    /// Load LLM settings from the environment
    ///
    /// Reads `INSIGHT_LLM_PROVIDER` ("gemini" or "openai") and
    /// `INSIGHT_LLM_MODEL`. Leaves the config unchanged when the provider
    /// variable is unset, so the lexical fallback stays in effect.
    pub fn with_env_llm(mut self) -> Result<Self> {
        let Ok(provider) = std::env::var("INSIGHT_LLM_PROVIDER") else {
            return Ok(self);
        };

        let kind = match provider.to_lowercase().as_str() {
            "gemini" => LlmKind::Gemini,
            "openai" => LlmKind::OpenAi,
            other => {
                return Err(InsightError::ConfigError(format!(
                    "Unknown LLM provider: {other}"
                )));
            }
        };

        let model = std::env::var("INSIGHT_LLM_MODEL").unwrap_or_else(|_| {
            match kind {
                LlmKind::Gemini => "gemini-2.0-flash",
                LlmKind::OpenAi => "gpt-4o-mini",
            }
            .to_string()
        });

        self.llm = Some(LlmSettings { kind, model });
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.worker_width == 0 {
            return Err(InsightError::ConfigError(
                "worker_width must be greater than 0".to_string(),
            ));
        }

        if self.resolve_budget.is_zero() {
            return Err(InsightError::ConfigError(
                "resolve_budget must be greater than zero".to_string(),
            ));
        }

        if self.regional_suffixes.iter().any(String::is_empty) {
            return Err(InsightError::ConfigError(
                "regional_suffixes must not contain empty entries".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for InsightConfig
#[derive(Debug, Default)]
pub struct InsightConfigBuilder {
    resolve_budget: Option<Duration>,
    regional_suffixes: Option<Vec<String>>,
    ticker_search_results: Option<usize>,
    sentiment_search_results: Option<usize>,
    worker_width: Option<usize>,
    scrape_timeout: Option<Duration>,
    scrape_max_chars: Option<usize>,
    min_content_chars: Option<usize>,
    summary_max_chars: Option<usize>,
    monthly_events_max_results: Option<usize>,
    noise_words: Option<HashSet<String>>,
    llm: Option<LlmSettings>,
}

impl InsightConfigBuilder {
    /// Set the resolution time budget
    pub fn resolve_budget(mut self, budget: Duration) -> Self {
        self.resolve_budget = Some(budget);
        self
    }

    /// Set the regional exchange suffixes
    pub fn regional_suffixes(mut self, suffixes: Vec<String>) -> Self {
        self.regional_suffixes = Some(suffixes);
        self
    }

    /// Set results per ticker-search query
    pub fn ticker_search_results(mut self, count: usize) -> Self {
        self.ticker_search_results = Some(count);
        self
    }

    /// Set the sentiment search result cap
    pub fn sentiment_search_results(mut self, count: usize) -> Self {
        self.sentiment_search_results = Some(count);
        self
    }

    /// Set the sentiment worker pool width
    pub fn worker_width(mut self, width: usize) -> Self {
        self.worker_width = Some(width);
        self
    }

    /// Set the page fetch timeout
    pub fn scrape_timeout(mut self, timeout: Duration) -> Self {
        self.scrape_timeout = Some(timeout);
        self
    }

    /// Set the fetched-page character cap
    pub fn scrape_max_chars(mut self, max: usize) -> Self {
        self.scrape_max_chars = Some(max);
        self
    }

    /// Set the minimum usable content length
    pub fn min_content_chars(mut self, min: usize) -> Self {
        self.min_content_chars = Some(min);
        self
    }

    /// Set the fallback summary character cap
    pub fn summary_max_chars(mut self, max: usize) -> Self {
        self.summary_max_chars = Some(max);
        self
    }

    /// Set the monthly-events result cap
    pub fn monthly_events_max_results(mut self, max: usize) -> Self {
        self.monthly_events_max_results = Some(max);
        self
    }

    /// Set the noise-word set for frequency ranking
    pub fn noise_words(mut self, words: HashSet<String>) -> Self {
        self.noise_words = Some(words);
        self
    }

    /// Set the LLM backend settings
    pub fn llm(mut self, settings: LlmSettings) -> Self {
        self.llm = Some(settings);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<InsightConfig> {
        let defaults = InsightConfig::default();

        let config = InsightConfig {
            resolve_budget: self.resolve_budget.unwrap_or(defaults.resolve_budget),
            regional_suffixes: self.regional_suffixes.unwrap_or(defaults.regional_suffixes),
            ticker_search_results: self
                .ticker_search_results
                .unwrap_or(defaults.ticker_search_results),
            sentiment_search_results: self
                .sentiment_search_results
                .unwrap_or(defaults.sentiment_search_results),
            worker_width: self.worker_width.unwrap_or(defaults.worker_width),
            scrape_timeout: self.scrape_timeout.unwrap_or(defaults.scrape_timeout),
            scrape_max_chars: self.scrape_max_chars.unwrap_or(defaults.scrape_max_chars),
            min_content_chars: self.min_content_chars.unwrap_or(defaults.min_content_chars),
            summary_max_chars: self.summary_max_chars.unwrap_or(defaults.summary_max_chars),
            monthly_events_max_results: self
                .monthly_events_max_results
                .unwrap_or(defaults.monthly_events_max_results),
            noise_words: self.noise_words.unwrap_or(defaults.noise_words),
            llm: self.llm,
        };

        config.validate()?;
        Ok(config)
    }
}
