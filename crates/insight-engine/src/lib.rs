//! Company insight engine
//!
//! This crate turns an unstructured company name into structured market
//! insight. It provides:
//!
//! - Identifier resolution: company name to probe-verified ticker symbol
//!   through an ordered strategy cascade under a shared time budget
//! - Trend analysis: seasonal statistics over historical closing prices
//! - Sentiment aggregation: bounded-concurrency fetch-and-classify over
//!   product-review coverage, with a deterministic lexical fallback
//! - Company research: fixed-query search bundles for news, products,
//!   market analysis, and sales
//!
//! External services are reached through the `insight-core` capability
//! traits; the `api` module ships live DuckDuckGo, HTTP page fetch, and
//! Yahoo Finance implementations. LLM classification is optional and
//! plugs in through any `insight-llm` provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_engine::{InsightConfig, InsightEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = InsightEngine::new(InsightConfig::default(), None)?;
//!
//!     if let Some(validated) = engine.resolve_symbol("Apple Inc").await {
//!         if let Some(report) = engine.price_trend(&validated.symbol, 3).await? {
//!             println!("{report:?}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod prompts;
pub mod research;
pub mod resolve;
pub mod sentiment;
pub mod trend;

// Re-export main types for convenience
pub use api::{DuckDuckGoClient, PageFetcher, YahooMarketClient};
pub use classify::LlmClassifier;
pub use config::{InsightConfig, LlmKind, LlmSettings};
pub use engine::InsightEngine;
pub use error::{EngineError, Result};
pub use research::CompanyResearcher;
pub use resolve::IdentifierResolver;
pub use sentiment::{LexicalSentimentScorer, SentimentAggregator};
pub use trend::TrendAnalyzer;
