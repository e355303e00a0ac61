//! Candidate extraction from search results

use insight_core::{CandidateSymbol, SearchHit};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z]{1,5})\)").expect("valid regex"));
static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TICKER\s+([A-Z]{1,5})").expect("valid regex"));
static STOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"STOCK\s+([A-Z]{1,5})").expect("valid regex"));
static EXCHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:NASDAQ|NYSE)\s+([A-Z]{1,5})").expect("valid regex"));

/// Tokens never treated as a ticker when found in parentheses
const PAREN_STOPWORDS: &[&str] = &[
    "NYSE", "NASDAQ", "INC", "CORP", "LTD", "USA", "UNK", "STOCK",
];

/// Uppercase a hit's text and flatten separators that hide ticker tokens
pub fn normalize(text: &str) -> String {
    text.to_uppercase().replace([':', '-'], " ")
}

/// Extract candidate ticker tokens from a single search hit
///
/// Duplicates are kept on purpose; the frequency fallback counts them.
pub fn extract_candidates(hit: &SearchHit) -> Vec<String> {
    let text = normalize(&format!("{} {}", hit.title, hit.snippet));
    let mut candidates = Vec::new();

    for caps in PAREN_RE.captures_iter(&text) {
        let token = &caps[1];
        if !PAREN_STOPWORDS.contains(&token) {
            candidates.push(token.to_string());
        }
    }
    for caps in TICKER_RE.captures_iter(&text) {
        candidates.push(caps[1].to_string());
    }
    for caps in STOCK_RE.captures_iter(&text) {
        candidates.push(caps[1].to_string());
    }
    for caps in EXCHANGE_RE.captures_iter(&text) {
        candidates.push(caps[1].to_string());
    }

    candidates
}

/// Rank candidate tokens by occurrence count
///
/// Noise words are dropped first. Ties resolve to the token seen
/// earliest in the pool, so the ordering is deterministic.
pub fn rank_by_frequency(candidates: &[CandidateSymbol], noise_words: &HashSet<String>) -> Vec<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        if noise_words.contains(&candidate.text) {
            continue;
        }
        let entry = counts.entry(&candidate.text).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().map(|(token, _)| token.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::CandidateSource;

    fn hit(title: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn pool(tokens: &[&str]) -> Vec<CandidateSymbol> {
        tokens
            .iter()
            .map(|t| CandidateSymbol {
                text: (*t).to_string(),
                source: CandidateSource::PatternExtracted,
            })
            .collect()
    }

    #[test]
    fn test_normalize_flattens_separators() {
        assert_eq!(normalize("NASDAQ: msft-stock"), "NASDAQ  MSFT STOCK");
    }

    #[test]
    fn test_paren_rule_with_stopwords() {
        let candidates = extract_candidates(&hit("Apple Inc. (AAPL) shares (NYSE)", "(INC)"));
        assert!(candidates.contains(&"AAPL".to_string()));
        assert!(!candidates.contains(&"NYSE".to_string()));
        assert!(!candidates.contains(&"INC".to_string()));
    }

    #[test]
    fn test_keyword_rules() {
        let candidates = extract_candidates(&hit(
            "Ticker MSFT overview",
            "The stock AMZN and NYSE: IBM coverage",
        ));
        assert!(candidates.contains(&"MSFT".to_string()));
        assert!(candidates.contains(&"AMZN".to_string()));
        assert!(candidates.contains(&"IBM".to_string()));
    }

    #[test]
    fn test_paren_rule_rejects_long_tokens() {
        let candidates = extract_candidates(&hit("Company (TOOLONG) report", ""));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_rank_by_frequency_orders_by_count() {
        let noise = HashSet::new();
        let ranked = rank_by_frequency(&pool(&["AAPL", "MSFT", "AAPL", "TSLA", "AAPL", "MSFT"]), &noise);
        assert_eq!(ranked, vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_rank_by_frequency_tie_first_seen() {
        let noise = HashSet::new();
        let ranked = rank_by_frequency(&pool(&["TSLA", "MSFT", "MSFT", "TSLA"]), &noise);
        assert_eq!(ranked, vec!["TSLA", "MSFT"]);
    }

    #[test]
    fn test_rank_by_frequency_drops_noise() {
        let noise: HashSet<String> = ["STOCK", "PRICE"].iter().map(ToString::to_string).collect();
        let ranked = rank_by_frequency(&pool(&["STOCK", "STOCK", "NVDA", "PRICE"]), &noise);
        assert_eq!(ranked, vec!["NVDA"]);
    }
}
