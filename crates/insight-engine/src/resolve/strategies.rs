//! Resolution strategies, tried in cascade order

use super::deadline::Deadline;
use super::extract;
use async_trait::async_trait;
use insight_core::{
    CandidateSource, CandidateSymbol, InsightClassifier, MarketDataProvider, SearchHit,
    SearchProvider, ValidatedSymbol,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Mutable state threaded through the cascade
///
/// Earlier strategies feed later ones: the web-search strategy fills the
/// hit list and candidate pool that AI extraction and frequency ranking
/// consume.
pub struct ResolveContext {
    pub company_name: String,
    pub hits: Vec<SearchHit>,
    pub candidates: Vec<CandidateSymbol>,
}

impl ResolveContext {
    pub fn new(company_name: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            hits: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

/// One step of the resolution cascade
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Try to produce a verified symbol, enriching `ctx` as a side effect
    async fn attempt(
        &self,
        ctx: &mut ResolveContext,
        deadline: &Deadline,
    ) -> Option<ValidatedSymbol>;
}

async fn probe(market: &dyn MarketDataProvider, symbol: &str, deadline: &Deadline) -> bool {
    deadline
        .bound(market.probe_symbol(symbol))
        .await
        .unwrap_or(false)
}

/// Probe a bare candidate, then each regional suffix, first success wins
async fn probe_with_suffixes(
    market: &dyn MarketDataProvider,
    base: &str,
    suffixes: &[String],
    deadline: &Deadline,
) -> Option<ValidatedSymbol> {
    if deadline.expired() {
        return None;
    }
    if probe(market, base, deadline).await {
        return Some(ValidatedSymbol::bare(base));
    }
    for suffix in suffixes {
        if deadline.expired() {
            return None;
        }
        let full = format!("{base}{suffix}");
        if probe(market, &full, deadline).await {
            return Some(ValidatedSymbol::with_suffix(base, suffix));
        }
    }
    None
}

/// Attribute a verified symbol to the regional suffix it carries, if any
fn attribute_suffix(symbol: &str, suffixes: &[String]) -> ValidatedSymbol {
    for suffix in suffixes {
        if let Some(base) = symbol.strip_suffix(suffix.as_str()) {
            if !base.is_empty() {
                return ValidatedSymbol::with_suffix(base, suffix);
            }
        }
    }
    ValidatedSymbol::bare(symbol)
}

/// Treats the input itself as a ticker when it already looks like one
pub struct DirectTickerStrategy {
    market: Arc<dyn MarketDataProvider>,
    suffixes: Vec<String>,
}

impl DirectTickerStrategy {
    pub fn new(market: Arc<dyn MarketDataProvider>, suffixes: Vec<String>) -> Self {
        Self { market, suffixes }
    }

    fn looks_like_ticker(name: &str) -> bool {
        let len = name.chars().count();
        if !(2..=12).contains(&len) {
            return false;
        }
        let dots = name.chars().filter(|c| *c == '.').count();
        dots <= 1 && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
    }
}

#[async_trait]
impl ResolveStrategy for DirectTickerStrategy {
    fn name(&self) -> &'static str {
        "direct-ticker"
    }

    async fn attempt(
        &self,
        ctx: &mut ResolveContext,
        deadline: &Deadline,
    ) -> Option<ValidatedSymbol> {
        let trimmed = ctx.company_name.trim();
        if !Self::looks_like_ticker(trimmed) {
            return None;
        }

        let upper = trimmed.to_uppercase();
        if probe(self.market.as_ref(), &upper, deadline).await {
            return Some(attribute_suffix(&upper, &self.suffixes));
        }

        if !upper.contains('.') {
            for suffix in &self.suffixes {
                if deadline.expired() {
                    return None;
                }
                let full = format!("{upper}{suffix}");
                if probe(self.market.as_ref(), &full, deadline).await {
                    return Some(ValidatedSymbol::with_suffix(&upper, suffix));
                }
            }
        }

        None
    }
}

/// Searches the web and harvests pattern-extracted candidates
///
/// Never resolves on its own; it exists to populate the context for the
/// strategies behind it.
pub struct WebSearchStrategy {
    search: Arc<dyn SearchProvider>,
    results_per_query: usize,
}

impl WebSearchStrategy {
    pub fn new(search: Arc<dyn SearchProvider>, results_per_query: usize) -> Self {
        Self {
            search,
            results_per_query,
        }
    }
}

#[async_trait]
impl ResolveStrategy for WebSearchStrategy {
    fn name(&self) -> &'static str {
        "web-search"
    }

    async fn attempt(
        &self,
        ctx: &mut ResolveContext,
        deadline: &Deadline,
    ) -> Option<ValidatedSymbol> {
        let name = ctx.company_name.clone();
        let queries = [
            format!("{name} stock ticker symbol"),
            format!("what is the stock ticker for {name}"),
        ];

        for query in queries {
            if deadline.expired() {
                break;
            }
            let hits = deadline
                .bound(self.search.search(&query, self.results_per_query))
                .await
                .unwrap_or_default();

            for hit in hits {
                for token in extract::extract_candidates(&hit) {
                    ctx.candidates.push(CandidateSymbol {
                        text: token,
                        source: CandidateSource::PatternExtracted,
                    });
                }
                ctx.hits.push(hit);
            }
        }

        debug!(
            "Collected {} candidates from {} hits",
            ctx.candidates.len(),
            ctx.hits.len()
        );
        None
    }
}

/// Asks the configured LLM to pick the symbol out of the search hits
pub struct AiExtractionStrategy {
    market: Arc<dyn MarketDataProvider>,
    classifier: Option<Arc<dyn InsightClassifier>>,
    suffixes: Vec<String>,
}

impl AiExtractionStrategy {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        classifier: Option<Arc<dyn InsightClassifier>>,
        suffixes: Vec<String>,
    ) -> Self {
        Self {
            market,
            classifier,
            suffixes,
        }
    }
}

#[async_trait]
impl ResolveStrategy for AiExtractionStrategy {
    fn name(&self) -> &'static str {
        "ai-extraction"
    }

    async fn attempt(
        &self,
        ctx: &mut ResolveContext,
        deadline: &Deadline,
    ) -> Option<ValidatedSymbol> {
        let Some(classifier) = &self.classifier else {
            debug!("No classifier configured, skipping AI extraction");
            return None;
        };
        if ctx.hits.is_empty() {
            return None;
        }

        let context = ctx
            .hits
            .iter()
            .map(|h| format!("{} {}", h.title, h.snippet))
            .collect::<Vec<_>>()
            .join("\n");

        let extracted = deadline
            .bound(classifier.extract_symbol(&ctx.company_name, &context))
            .await;

        match extracted {
            Some(Ok(Some(symbol))) => {
                ctx.candidates.push(CandidateSymbol {
                    text: symbol.clone(),
                    source: CandidateSource::AiExtracted,
                });
                probe_with_suffixes(self.market.as_ref(), &symbol, &self.suffixes, deadline).await
            }
            Some(Ok(None)) => None,
            Some(Err(e)) => {
                debug!("AI extraction failed: {e}");
                None
            }
            None => None,
        }
    }
}

/// Probes the most frequent candidates from the pool as a last resort
pub struct FrequencyRankStrategy {
    market: Arc<dyn MarketDataProvider>,
    suffixes: Vec<String>,
    noise_words: HashSet<String>,
}

impl FrequencyRankStrategy {
    const TOP_CANDIDATES: usize = 3;

    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        suffixes: Vec<String>,
        noise_words: HashSet<String>,
    ) -> Self {
        Self {
            market,
            suffixes,
            noise_words,
        }
    }
}

#[async_trait]
impl ResolveStrategy for FrequencyRankStrategy {
    fn name(&self) -> &'static str {
        "frequency-rank"
    }

    async fn attempt(
        &self,
        ctx: &mut ResolveContext,
        deadline: &Deadline,
    ) -> Option<ValidatedSymbol> {
        let ranked = extract::rank_by_frequency(&ctx.candidates, &self.noise_words);

        for token in ranked.iter().take(Self::TOP_CANDIDATES) {
            if deadline.expired() {
                return None;
            }
            if let Some(validated) =
                probe_with_suffixes(self.market.as_ref(), token, &self.suffixes, deadline).await
            {
                return Some(validated);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_ticker() {
        assert!(DirectTickerStrategy::looks_like_ticker("AAPL"));
        assert!(DirectTickerStrategy::looks_like_ticker("aapl"));
        assert!(DirectTickerStrategy::looks_like_ticker("BRK.B"));
        assert!(DirectTickerStrategy::looks_like_ticker("RELIANCE.NS"));
        assert!(!DirectTickerStrategy::looks_like_ticker("A"));
        assert!(!DirectTickerStrategy::looks_like_ticker("Apple Inc"));
        assert!(!DirectTickerStrategy::looks_like_ticker("A.B.C"));
        assert!(!DirectTickerStrategy::looks_like_ticker("averylongcompanyname"));
    }

    #[test]
    fn test_attribute_suffix() {
        let suffixes = vec![".NS".to_string(), ".BO".to_string()];

        let validated = attribute_suffix("RELIANCE.NS", &suffixes);
        assert_eq!(validated.symbol, "RELIANCE.NS");
        assert_eq!(validated.exchange_suffix.as_deref(), Some(".NS"));

        let validated = attribute_suffix("AAPL", &suffixes);
        assert_eq!(validated.symbol, "AAPL");
        assert!(validated.exchange_suffix.is_none());
    }
}
