//! Core abstractions for the company insight engine
//!
//! This crate defines the shared domain types, the capability traits the
//! engine components consume (web search, content fetching, market data,
//! classification), and the common error type. Concrete providers live in
//! `insight-engine` and `insight-llm`.

pub mod capability;
pub mod error;
pub mod types;

pub use capability::{
    Classification, ContentFetcher, InsightClassifier, MarketDataProvider, SearchProvider,
};
pub use error::{InsightError, Result};
pub use types::{
    CandidateSource, CandidateSymbol, CompanyResearch, PricePoint, ProductInsight, SearchHit,
    SentimentLabel, TrendReport, ValidatedSymbol,
};
