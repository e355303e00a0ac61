//! Error types for engine operations

use thiserror::Error;

/// Engine-specific errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Web search request failed
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// Page fetch failed
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Market data provider failed
    #[error("Market data error: {0}")]
    MarketDataError(String),

    /// Classification backend failed
    #[error("Classification error: {0}")]
    ClassificationError(String),

    /// Invalid argument at the operation boundary
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

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

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Convert EngineError to insight_core::InsightError
impl From<EngineError> for insight_core::InsightError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::SearchFailed(msg) => insight_core::InsightError::SearchError(msg),
            EngineError::FetchFailed(msg) => insight_core::InsightError::FetchError(msg),
            EngineError::MarketDataError(msg) => insight_core::InsightError::MarketDataError(msg),
            EngineError::ClassificationError(msg) => {
                insight_core::InsightError::ClassificationError(msg)
            }
            EngineError::ConfigError(msg) => insight_core::InsightError::ConfigError(msg),
            other => insight_core::InsightError::Other(other.to_string()),
        }
    }
}

/// Convert insight_core::InsightError to EngineError
impl From<insight_core::InsightError> for EngineError {
    fn from(err: insight_core::InsightError) -> Self {
        EngineError::Other(err.to_string())
    }
}

/// Convert insight_llm::LlmError to EngineError
impl From<insight_llm::LlmError> for EngineError {
    fn from(err: insight_llm::LlmError) -> Self {
        EngineError::ClassificationError(err.to_string())
    }
}
