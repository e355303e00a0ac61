//! Fixed-query company research helpers

use insight_core::{CompanyResearch, SearchHit, SearchProvider};
use std::sync::Arc;
use tracing::{debug, instrument};

const NEWS_RESULTS: usize = 5;
const RESEARCH_RESULTS: usize = 3;
const PRODUCT_RESULTS: usize = 4;
const SALES_RESULTS: usize = 3;

/// Thin search wrappers for common company research questions
///
/// All helpers inherit the search provider's empty-on-failure semantics;
/// a failed search is an empty result set, never an error.
pub struct CompanyResearcher {
    search: Arc<dyn SearchProvider>,
    monthly_events_max_results: usize,
}

impl CompanyResearcher {
    pub fn new(search: Arc<dyn SearchProvider>, monthly_events_max_results: usize) -> Self {
        Self {
            search,
            monthly_events_max_results,
        }
    }

    /// Latest news coverage for the company
    pub async fn latest_news(&self, company_name: &str) -> Vec<SearchHit> {
        self.search
            .search(&format!("{company_name} company latest news"), NEWS_RESULTS)
            .await
    }

    /// Market research and analysis coverage
    pub async fn market_research(&self, company_name: &str) -> Vec<SearchHit> {
        self.search
            .search(
                &format!("{company_name} company market research analysis"),
                RESEARCH_RESULTS,
            )
            .await
    }

    /// Main products and services
    pub async fn product_info(&self, company_name: &str) -> Vec<SearchHit> {
        self.search
            .search(
                &format!("{company_name} company main products and services"),
                PRODUCT_RESULTS,
            )
            .await
    }

    /// Revenue and sales reporting
    pub async fn sales_search(&self, company_name: &str) -> Vec<SearchHit> {
        self.search
            .search(
                &format!("{company_name} company annual revenue sales financial report 2024"),
                SALES_RESULTS,
            )
            .await
    }

    /// News for a specific month and year
    pub async fn monthly_events(
        &self,
        company_name: &str,
        month: &str,
        year: i32,
    ) -> Vec<SearchHit> {
        self.search
            .search(
                &format!("{company_name} {month} {year} news"),
                self.monthly_events_max_results,
            )
            .await
    }

    /// Run the four fixed research searches concurrently
    #[instrument(skip(self), fields(company = %company_name))]
    pub async fn gather(&self, company_name: &str) -> CompanyResearch {
        let (news, products, research, sales) = futures::join!(
            self.latest_news(company_name),
            self.product_info(company_name),
            self.market_research(company_name),
            self.sales_search(company_name),
        );

        debug!(
            "Gathered {} news, {} product, {} research, {} sales hits",
            news.len(),
            products.len(),
            research.len(),
            sales.len()
        );

        CompanyResearch {
            news,
            products,
            research,
            sales,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        Search {}

        #[async_trait]
        impl SearchProvider for Search {
            async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit>;
        }
    }

    fn hit(title: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            snippet: String::new(),
        }
    }

    #[tokio::test]
    async fn test_gather_bundles_all_queries() {
        let mut search = MockSearch::new();
        search.expect_search().times(4).returning(|query, _| {
            if query.contains("latest news") {
                vec![hit("news")]
            } else if query.contains("products and services") {
                vec![hit("products")]
            } else if query.contains("market research") {
                vec![hit("research")]
            } else {
                vec![hit("sales")]
            }
        });

        let researcher = CompanyResearcher::new(Arc::new(search), 20);
        let bundle = researcher.gather("Acme").await;

        assert_eq!(bundle.news[0].title, "news");
        assert_eq!(bundle.products[0].title, "products");
        assert_eq!(bundle.research[0].title, "research");
        assert_eq!(bundle.sales[0].title, "sales");
    }

    #[tokio::test]
    async fn test_result_caps() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|query, max| query.contains("latest news") && *max == 5)
            .returning(|_, _| Vec::new());

        let researcher = CompanyResearcher::new(Arc::new(search), 20);
        assert!(researcher.latest_news("Acme").await.is_empty());
    }

    #[tokio::test]
    async fn test_monthly_events_query_shape() {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|query, max| query == "Acme March 2025 news" && *max == 20)
            .returning(|_, _| vec![hit("event")]);

        let researcher = CompanyResearcher::new(Arc::new(search), 20);
        let hits = researcher.monthly_events("Acme", "March", 2025).await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_search_is_empty() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| Vec::new());

        let researcher = CompanyResearcher::new(Arc::new(search), 20);
        let bundle = researcher.gather("Acme").await;
        assert!(bundle.news.is_empty());
        assert!(bundle.sales.is_empty());
    }
}
