//! Identifier resolution cascade
//!
//! Turns an unstructured company name into a probe-verified market symbol
//! by running an ordered list of strategies under a shared time budget.

mod deadline;
mod extract;
mod strategies;

pub use deadline::Deadline;
pub use strategies::{
    AiExtractionStrategy, DirectTickerStrategy, FrequencyRankStrategy, ResolveContext,
    ResolveStrategy, WebSearchStrategy,
};

use crate::config::InsightConfig;
use insight_core::{InsightClassifier, MarketDataProvider, SearchProvider, ValidatedSymbol};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Bounded-time company-name-to-symbol resolver
///
/// Strategies run strictly in order: direct ticker, web search harvesting,
/// AI extraction, frequency-ranked fallback. The first verified symbol
/// wins; budget or strategy exhaustion yields `None`.
pub struct IdentifierResolver {
    budget: Duration,
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl IdentifierResolver {
    /// Wire the cascade from configuration and providers
    pub fn new(
        config: &InsightConfig,
        search: Arc<dyn SearchProvider>,
        market: Arc<dyn MarketDataProvider>,
        classifier: Option<Arc<dyn InsightClassifier>>,
    ) -> Self {
        let strategies: Vec<Box<dyn ResolveStrategy>> = vec![
            Box::new(DirectTickerStrategy::new(
                market.clone(),
                config.regional_suffixes.clone(),
            )),
            Box::new(WebSearchStrategy::new(
                search,
                config.ticker_search_results,
            )),
            Box::new(AiExtractionStrategy::new(
                market.clone(),
                classifier,
                config.regional_suffixes.clone(),
            )),
            Box::new(FrequencyRankStrategy::new(
                market,
                config.regional_suffixes.clone(),
                config.noise_words.clone(),
            )),
        ];

        Self {
            budget: config.resolve_budget,
            strategies,
        }
    }

    /// Resolve a company name to a verified symbol within the budget
    #[instrument(skip(self), fields(company = %company_name))]
    pub async fn resolve(&self, company_name: &str) -> Option<ValidatedSymbol> {
        let deadline = Deadline::after(self.budget);
        let mut ctx = ResolveContext::new(company_name);

        for strategy in &self.strategies {
            if deadline.expired() {
                debug!("Budget exhausted before strategy '{}'", strategy.name());
                return None;
            }
            debug!("Trying strategy '{}'", strategy.name());
            if let Some(validated) = strategy.attempt(&mut ctx, &deadline).await {
                info!("Resolved '{company_name}' to {}", validated.symbol);
                return Some(validated);
            }
        }

        debug!("All strategies exhausted for '{company_name}'");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use insight_core::{Classification, PricePoint, SearchHit};
    use mockall::mock;

    mock! {
        Search {}

        #[async_trait]
        impl SearchProvider for Search {
            async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit>;
        }
    }

    mock! {
        Market {}

        #[async_trait]
        impl MarketDataProvider for Market {
            async fn price_history(
                &self,
                symbol: &str,
                start: NaiveDate,
                end: NaiveDate,
            ) -> insight_core::Result<Vec<PricePoint>>;

            async fn probe_symbol(&self, symbol: &str) -> bool;
        }
    }

    mock! {
        Classifier {}

        #[async_trait]
        impl InsightClassifier for Classifier {
            async fn classify(
                &self,
                company_name: &str,
                text: &str,
            ) -> insight_core::Result<Classification>;

            async fn extract_symbol(
                &self,
                company_name: &str,
                context: &str,
            ) -> insight_core::Result<Option<String>>;
        }
    }

    fn hit(title: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn resolver(
        search: MockSearch,
        market: MockMarket,
        classifier: Option<MockClassifier>,
    ) -> IdentifierResolver {
        IdentifierResolver::new(
            &InsightConfig::default(),
            Arc::new(search),
            Arc::new(market),
            classifier.map(|c| Arc::new(c) as Arc<dyn InsightClassifier>),
        )
    }

    #[tokio::test]
    async fn test_direct_ticker_skips_search() {
        let mut search = MockSearch::new();
        search.expect_search().never();

        let mut market = MockMarket::new();
        market
            .expect_probe_symbol()
            .withf(|s| s == "AAPL")
            .times(1)
            .returning(|_| true);

        let resolved = resolver(search, market, None).resolve("aapl").await;
        assert_eq!(resolved, Some(ValidatedSymbol::bare("AAPL")));
    }

    #[tokio::test]
    async fn test_direct_ticker_regional_suffix() {
        let mut search = MockSearch::new();
        search.expect_search().never();

        let mut market = MockMarket::new();
        market
            .expect_probe_symbol()
            .withf(|s| s == "RELIANCE")
            .returning(|_| false);
        market
            .expect_probe_symbol()
            .withf(|s| s == "RELIANCE.NS")
            .returning(|_| true);

        let resolved = resolver(search, market, None).resolve("reliance").await;
        assert_eq!(
            resolved,
            Some(ValidatedSymbol::with_suffix("RELIANCE", ".NS"))
        );
    }

    #[tokio::test]
    async fn test_expired_budget_skips_all_strategies() {
        let search = MockSearch::new();
        let market = MockMarket::new();

        let config = InsightConfig {
            resolve_budget: std::time::Duration::from_nanos(1),
            ..Default::default()
        };
        let resolver = IdentifierResolver::new(
            &config,
            Arc::new(search),
            Arc::new(market),
            None,
        );

        assert!(resolver.resolve("Apple Inc").await.is_none());
    }

    #[tokio::test]
    async fn test_frequency_fallback_resolves() {
        let mut search = MockSearch::new();
        search.expect_search().times(2).returning(|query, _| {
            if query.contains("ticker symbol") {
                vec![
                    hit("Apple Inc. (AAPL) Stock Overview", "Shares of (AAPL) on NASDAQ"),
                    hit("Microsoft (MSFT) news", ""),
                ]
            } else {
                Vec::new()
            }
        });

        let mut market = MockMarket::new();
        market
            .expect_probe_symbol()
            .withf(|s| s == "AAPL")
            .times(1)
            .returning(|_| true);

        let resolved = resolver(search, market, None).resolve("Apple Inc").await;
        assert_eq!(resolved, Some(ValidatedSymbol::bare("AAPL")));
    }

    #[tokio::test]
    async fn test_ai_extraction_resolves() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .times(2)
            .returning(|_, _| vec![hit("Tesla quarterly report", "electric vehicles")]);

        let mut classifier = MockClassifier::new();
        classifier
            .expect_extract_symbol()
            .times(1)
            .returning(|_, _| Ok(Some("TSLA".to_string())));

        let mut market = MockMarket::new();
        market
            .expect_probe_symbol()
            .withf(|s| s == "TSLA")
            .times(1)
            .returning(|_| true);

        let resolved = resolver(search, market, Some(classifier))
            .resolve("Tesla Motors")
            .await;
        assert_eq!(resolved, Some(ValidatedSymbol::bare("TSLA")));
    }

    #[tokio::test]
    async fn test_ai_extraction_error_degrades() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .times(2)
            .returning(|_, _| vec![hit("Some company update", "no symbols here")]);

        let mut classifier = MockClassifier::new();
        classifier.expect_extract_symbol().returning(|_, _| {
            Err(insight_core::InsightError::ClassificationError(
                "provider down".to_string(),
            ))
        });

        let market = MockMarket::new();

        let resolved = resolver(search, market, Some(classifier))
            .resolve("Some Company")
            .await;
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_nothing_found_is_none() {
        let mut search = MockSearch::new();
        search.expect_search().times(2).returning(|_, _| Vec::new());

        let market = MockMarket::new();

        let resolved = resolver(search, market, None).resolve("Obscure Company").await;
        assert!(resolved.is_none());
    }
}
