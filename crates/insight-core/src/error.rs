//! Error types for insight operations

use thiserror::Error;

/// Result type alias for insight operations
pub type Result<T> = std::result::Result<T, InsightError>;

/// Error type shared across the insight engine components
#[derive(Debug, Error)]
pub enum InsightError {
    /// Web search request failed
    #[error("Search error: {0}")]
    SearchError(String),

    /// Page content could not be fetched
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// Market data provider failed
    #[error("Market data error: {0}")]
    MarketDataError(String),

    /// Classifier or extraction backend failed
    #[error("Classification error: {0}")]
    ClassificationError(String),

    /// Invalid symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
