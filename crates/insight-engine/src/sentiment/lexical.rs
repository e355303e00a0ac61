//! Deterministic dictionary-based sentiment scoring

use insight_core::SentimentLabel;

/// Scores above this are positive, below its negation negative
const LABEL_THRESHOLD: f64 = 0.1;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "loved",
    "best",
    "fantastic",
    "awesome",
    "impressive",
    "reliable",
    "recommend",
    "recommended",
    "happy",
    "satisfied",
    "solid",
    "smooth",
    "worth",
    "comfortable",
    "fast",
    "beautiful",
    "perfect",
    "durable",
    "helpful",
    "improved",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "awful",
    "hate",
    "hated",
    "worst",
    "disappointing",
    "disappointed",
    "broken",
    "slow",
    "overpriced",
    "refund",
    "faulty",
    "defective",
    "unreliable",
    "waste",
    "flimsy",
    "uncomfortable",
    "buggy",
    "crash",
    "crashes",
    "issue",
    "issues",
    "problem",
    "problems",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "won't", "isn't", "wasn't", "hardly",
    "barely",
];

/// Dictionary polarity scorer used when no LLM backend is configured
///
/// Each matched sentiment word contributes +1 or -1, flipped when the
/// word directly follows a negation. The score is the mean contribution,
/// clamped to [-1.0, 1.0]; text with no matches scores 0.0.
#[derive(Debug, Default, Clone)]
pub struct LexicalSentimentScorer {}

impl LexicalSentimentScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// Score `text` in [-1.0, 1.0]
    pub fn score(&self, text: &str) -> f64 {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|word| {
                word.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '\'')
                    .collect::<String>()
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .collect();

        let mut sum = 0.0_f64;
        let mut matched = 0_usize;

        for (index, token) in tokens.iter().enumerate() {
            let polarity = if POSITIVE_WORDS.contains(&token.as_str()) {
                1.0
            } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                -1.0
            } else {
                continue;
            };

            let negated = index
                .checked_sub(1)
                .and_then(|i| tokens.get(i))
                .is_some_and(|prev| NEGATION_WORDS.contains(&prev.as_str()));

            sum += if negated { -polarity } else { polarity };
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (sum / matched as f64).clamp(-1.0, 1.0)
    }

    /// Map a score to its label
    pub fn label_for(score: f64) -> SentimentLabel {
        if score > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}
