//! Bounded fan-out sentiment aggregation
//!
//! Searches for product-review coverage, fetches each hit inside a
//! bounded worker pool, and classifies the content with the configured
//! backend. Results arrive in completion order.

mod lexical;

pub use lexical::LexicalSentimentScorer;

use crate::config::InsightConfig;
use insight_core::{
    ContentFetcher, InsightClassifier, ProductInsight, SearchHit, SearchProvider, SentimentLabel,
};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, instrument, warn};

/// Classification backend, chosen once at construction
///
/// The LLM variant still degrades to the lexical scorer per hit when the
/// provider fails; the lexical variant never consults a provider.
enum ClassifierBackend {
    Ai {
        classifier: Arc<dyn InsightClassifier>,
        fallback: LexicalSentimentScorer,
    },
    Lexical(LexicalSentimentScorer),
}

/// Per-hit processing shared across worker tasks
struct HitWorker {
    fetcher: Arc<dyn ContentFetcher>,
    backend: ClassifierBackend,
    min_content_chars: usize,
    summary_max_chars: usize,
}

impl HitWorker {
    async fn process(&self, company_name: &str, hit: SearchHit) -> Option<ProductInsight> {
        let fetched = self.fetcher.fetch_text(&hit.link).await;

        let content = if fetched.chars().count() >= self.min_content_chars {
            fetched
        } else {
            debug!("Thin content for {}, using snippet proxy", hit.link);
            format!("{} {}", hit.snippet, hit.title).trim().to_string()
        };

        if content.is_empty() {
            debug!("No usable content for {}", hit.link);
            return None;
        }

        let (sentiment_score, sentiment_label, similarity_score, summary) =
            self.classify(company_name, &content).await;

        Some(ProductInsight {
            title: hit.title,
            link: hit.link,
            sentiment_score,
            sentiment_label,
            similarity_score,
            summary,
        })
    }

    async fn classify(
        &self,
        company_name: &str,
        content: &str,
    ) -> (f64, SentimentLabel, Option<f64>, String) {
        match &self.backend {
            ClassifierBackend::Ai {
                classifier,
                fallback,
            } => match classifier.classify(company_name, content).await {
                Ok(classification) => {
                    let summary = classification
                        .summary
                        .unwrap_or_else(|| truncate_summary(content, self.summary_max_chars));
                    (
                        classification.sentiment_score,
                        classification.sentiment_label,
                        classification.similarity_score,
                        summary,
                    )
                }
                Err(e) => {
                    warn!("Classifier failed, falling back to lexical scoring: {e}");
                    self.lexical(fallback, content)
                }
            },
            ClassifierBackend::Lexical(scorer) => self.lexical(scorer, content),
        }
    }

    fn lexical(
        &self,
        scorer: &LexicalSentimentScorer,
        content: &str,
    ) -> (f64, SentimentLabel, Option<f64>, String) {
        let score = scorer.score(content);
        (
            score,
            LexicalSentimentScorer::label_for(score),
            None,
            truncate_summary(content, self.summary_max_chars),
        )
    }
}

/// Aggregates per-product sentiment for a company
pub struct SentimentAggregator {
    search: Arc<dyn SearchProvider>,
    worker: Arc<HitWorker>,
    search_results: usize,
    worker_width: usize,
}

impl SentimentAggregator {
    /// Build the aggregator, selecting the classification backend from
    /// whether an LLM classifier is configured
    pub fn new(
        config: &InsightConfig,
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn ContentFetcher>,
        classifier: Option<Arc<dyn InsightClassifier>>,
    ) -> Self {
        let backend = match classifier {
            Some(classifier) => ClassifierBackend::Ai {
                classifier,
                fallback: LexicalSentimentScorer::new(),
            },
            None => ClassifierBackend::Lexical(LexicalSentimentScorer::new()),
        };

        Self {
            search,
            worker: Arc::new(HitWorker {
                fetcher,
                backend,
                min_content_chars: config.min_content_chars,
                summary_max_chars: config.summary_max_chars,
            }),
            search_results: config.sentiment_search_results,
            worker_width: config.worker_width,
        }
    }

    /// Gather product insights for `company_name`
    ///
    /// Returns at most one entry per search hit, in the order the workers
    /// finish. A hit that fails anywhere in its pipeline is dropped
    /// without affecting the others.
    #[instrument(skip(self), fields(company = %company_name))]
    pub async fn aggregate(&self, company_name: &str) -> Vec<ProductInsight> {
        let query = format!("{company_name} consumer product reviews sentiment");
        let hits = self.search.search(&query, self.search_results).await;
        if hits.is_empty() {
            debug!("No search hits for '{company_name}'");
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.worker_width));
        let (tx, mut rx) = mpsc::channel(hits.len());

        for hit in hits {
            let semaphore = semaphore.clone();
            let tx = tx.clone();
            let worker = self.worker.clone();
            let company = company_name.to_string();

            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                if let Some(insight) = worker.process(&company, hit).await {
                    let _ = tx.send(insight).await;
                }
            });
        }
        drop(tx);

        let mut insights = Vec::new();
        while let Some(insight) = rx.recv().await {
            insights.push(insight);
        }

        debug!("Aggregated {} insights", insights.len());
        insights
    }
}

/// Cap a summary at `max_chars`, appending an ellipsis when truncated
fn truncate_summary(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use insight_core::Classification;
    use mockall::mock;

    mock! {
        Search {}

        #[async_trait]
        impl SearchProvider for Search {
            async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit>;
        }
    }

    mock! {
        Fetcher {}

        #[async_trait]
        impl ContentFetcher for Fetcher {
            async fn fetch_text(&self, url: &str) -> String;
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

    fn hit(n: usize, snippet: &str) -> SearchHit {
        SearchHit {
            title: format!("Review {n}"),
            link: format!("https://example.com/review/{n}"),
            snippet: snippet.to_string(),
        }
    }

    fn review_hits(count: usize) -> Vec<SearchHit> {
        (0..count).map(|n| hit(n, "great product, love it")).collect()
    }

    fn aggregator(
        search: MockSearch,
        fetcher: MockFetcher,
        classifier: Option<MockClassifier>,
    ) -> SentimentAggregator {
        SentimentAggregator::new(
            &InsightConfig::default(),
            Arc::new(search),
            Arc::new(fetcher),
            classifier.map(|c| Arc::new(c) as Arc<dyn InsightClassifier>),
        )
    }

    #[tokio::test]
    async fn test_empty_search_yields_empty() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| Vec::new());
        let fetcher = MockFetcher::new();

        let insights = aggregator(search, fetcher, None).aggregate("Acme").await;
        assert!(insights.is_empty());
    }

    #[tokio::test]
    async fn test_snippet_proxy_with_lexical_backend() {
        // Every fetch comes back empty; the snippet proxy plus the lexical
        // scorer still produce one entry per hit, similarity absent
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| review_hits(5));

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch_text()
            .times(5)
            .returning(|_| String::new());

        let insights = aggregator(search, fetcher, None).aggregate("Acme").await;
        assert_eq!(insights.len(), 5);
        for insight in &insights {
            assert!(insight.similarity_score.is_none());
            assert_eq!(insight.sentiment_label, SentimentLabel::Positive);
        }
    }

    #[tokio::test]
    async fn test_unusable_hit_produces_no_entry() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| {
            vec![
                hit(0, "excellent and reliable"),
                SearchHit {
                    title: String::new(),
                    link: "https://example.com/empty".to_string(),
                    snippet: String::new(),
                },
            ]
        });

        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch_text().returning(|_| String::new());

        let insights = aggregator(search, fetcher, None).aggregate("Acme").await;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Review 0");
    }

    #[tokio::test]
    async fn test_ai_backend_fields_trusted() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| review_hits(1));

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch_text()
            .returning(|_| "long fetched content ".repeat(10));

        let mut classifier = MockClassifier::new();
        classifier.expect_classify().returning(|_, _| {
            Ok(Classification {
                sentiment_score: -0.7,
                sentiment_label: SentimentLabel::Negative,
                similarity_score: Some(0.8),
                summary: Some("Widely panned".to_string()),
            })
        });

        let insights = aggregator(search, fetcher, Some(classifier))
            .aggregate("Acme")
            .await;
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].sentiment_score, -0.7);
        assert_eq!(insights[0].similarity_score, Some(0.8));
        assert_eq!(insights[0].summary, "Widely panned");
    }

    #[tokio::test]
    async fn test_ai_failure_falls_back_per_hit() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| review_hits(3));

        let mut fetcher = MockFetcher::new();
        fetcher.expect_fetch_text().returning(|_| String::new());

        let mut classifier = MockClassifier::new();
        classifier.expect_classify().returning(|_, _| {
            Err(insight_core::InsightError::ClassificationError(
                "provider down".to_string(),
            ))
        });

        let insights = aggregator(search, fetcher, Some(classifier))
            .aggregate("Acme")
            .await;
        assert_eq!(insights.len(), 3);
        for insight in &insights {
            assert!(insight.similarity_score.is_none());
        }
    }

    #[tokio::test]
    async fn test_at_most_one_entry_per_hit() {
        let mut search = MockSearch::new();
        search.expect_search().returning(|_, _| review_hits(4));

        let mut fetcher = MockFetcher::new();
        fetcher
            .expect_fetch_text()
            .returning(|_| "a decent product overall, works as described".repeat(5));

        let insights = aggregator(search, fetcher, None).aggregate("Acme").await;
        assert!(insights.len() <= 4);
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("short", 300), "short");

        let long = "x".repeat(400);
        let truncated = truncate_summary(&long, 300);
        assert_eq!(truncated.chars().count(), 303);
        assert!(truncated.ends_with("..."));
    }

    #[tokio::test]
    async fn test_lexical_summary_is_capped_truncation() {
        let worker = HitWorker {
            fetcher: Arc::new(MockFetcher::new()),
            backend: ClassifierBackend::Lexical(LexicalSentimentScorer::new()),
            min_content_chars: 100,
            summary_max_chars: 10,
        };

        let (_, _, _, summary) = worker
            .classify("Acme", "a fairly long piece of content here")
            .await;
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 13);
    }
}
