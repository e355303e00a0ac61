//! Top-level facade wiring providers into the analysis components

use crate::api::{DuckDuckGoClient, PageFetcher, YahooMarketClient};
use crate::config::InsightConfig;
use crate::research::CompanyResearcher;
use crate::resolve::IdentifierResolver;
use crate::sentiment::SentimentAggregator;
use crate::trend::TrendAnalyzer;
use insight_core::{
    CompanyResearch, ContentFetcher, InsightClassifier, MarketDataProvider, ProductInsight,
    SearchHit, SearchProvider, TrendReport, ValidatedSymbol,
};
use std::sync::Arc;
use tracing::info;

/// One-stop entry point over resolution, trends, sentiment, and research
///
/// Components share the provider instances they are built with; the
/// engine itself holds no mutable state and is cheap to share behind an
/// `Arc`.
pub struct InsightEngine {
    resolver: IdentifierResolver,
    trend: TrendAnalyzer,
    sentiment: SentimentAggregator,
    research: CompanyResearcher,
}

impl InsightEngine {
    /// Build an engine with the default live providers
    ///
    /// Uses DuckDuckGo for search, a plain HTTP fetcher for page content,
    /// and Yahoo Finance for market data. Pass a classifier to enable LLM
    /// classification; `None` selects the lexical fallback throughout.
    pub fn new(
        config: InsightConfig,
        classifier: Option<Arc<dyn InsightClassifier>>,
    ) -> crate::error::Result<Self> {
        config.validate()?;

        let search: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoClient::default());
        let fetcher: Arc<dyn ContentFetcher> = Arc::new(PageFetcher::new(
            config.scrape_timeout,
            config.scrape_max_chars,
        )?);
        let market: Arc<dyn MarketDataProvider> = Arc::new(YahooMarketClient::new());

        Ok(Self::with_providers(
            &config, search, fetcher, market, classifier,
        ))
    }

    /// Build an engine from explicit provider instances
    pub fn with_providers(
        config: &InsightConfig,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn ContentFetcher>,
        market: Arc<dyn MarketDataProvider>,
        classifier: Option<Arc<dyn InsightClassifier>>,
    ) -> Self {
        info!(
            llm = classifier.is_some(),
            "Building insight engine (budget {:?}, {} workers)",
            config.resolve_budget,
            config.worker_width
        );

        Self {
            resolver: IdentifierResolver::new(
                config,
                search.clone(),
                market.clone(),
                classifier.clone(),
            ),
            trend: TrendAnalyzer::new(market),
            sentiment: SentimentAggregator::new(config, search.clone(), fetcher, classifier),
            research: CompanyResearcher::new(search, config.monthly_events_max_results),
        }
    }

    /// Resolve a company name to a probe-verified market symbol
    pub async fn resolve_symbol(&self, company_name: &str) -> Option<ValidatedSymbol> {
        self.resolver.resolve(company_name).await
    }

    /// Seasonal trend statistics over `years` of price history
    ///
    /// Returns an error for `years == 0`; provider failures degrade to
    /// `Ok(None)`.
    pub async fn price_trend(
        &self,
        symbol: &str,
        years: u32,
    ) -> crate::error::Result<Option<TrendReport>> {
        if years == 0 {
            return Err(crate::error::EngineError::InvalidArgument(
                "years must be at least 1".to_string(),
            ));
        }
        Ok(self.trend.analyze(symbol, years).await)
    }

    /// Per-product sentiment insights for a company
    pub async fn product_sentiment(&self, company_name: &str) -> Vec<ProductInsight> {
        self.sentiment.aggregate(company_name).await
    }

    /// The four fixed research searches, bundled
    pub async fn company_research(&self, company_name: &str) -> CompanyResearch {
        self.research.gather(company_name).await
    }

    /// News coverage for a specific month and year
    pub async fn monthly_events(
        &self,
        company_name: &str,
        month: &str,
        year: i32,
    ) -> Vec<SearchHit> {
        self.research.monthly_events(company_name, month, year).await
    }
}
