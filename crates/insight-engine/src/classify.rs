//! LLM-backed classification and ticker extraction

use crate::prompts;
use async_trait::async_trait;
use insight_core::{Classification, InsightClassifier, InsightError};
use insight_llm::{CompletionRequest, LlmProvider};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// InsightClassifier implementation over an LLM provider
///
/// Builds the extraction/classification prompts, runs a completion, and
/// parses the model's JSON answer. Code fences around the JSON are
/// tolerated; anything else is a classification error the caller may
/// degrade from.
pub struct LlmClassifier {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct TickerAnswer {
    ticker: Option<String>,
}

impl LlmClassifier {
    /// Create a classifier over the given provider and model
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    async fn complete(&self, system: &str, prompt: String) -> insight_core::Result<String> {
        let request = CompletionRequest::builder(&self.model)
            .system(system)
            .prompt(prompt)
            .max_tokens(1024)
            .temperature(0.0)
            .build();

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| InsightError::ClassificationError(e.to_string()))?;

        Ok(response.text)
    }
}

#[async_trait]
impl InsightClassifier for LlmClassifier {
    #[instrument(skip(self, text), fields(company = %company_name))]
    async fn classify(
        &self,
        company_name: &str,
        text: &str,
    ) -> insight_core::Result<Classification> {
        let prompt = prompts::sentiment_classification_prompt(company_name, text);
        let answer = self
            .complete(prompts::SENTIMENT_SYSTEM_PROMPT, prompt)
            .await?;

        let classification: Classification = serde_json::from_str(strip_code_fences(&answer))?;
        debug!(
            "Classified with score {:.2}",
            classification.sentiment_score
        );
        Ok(classification)
    }

    #[instrument(skip(self, context), fields(company = %company_name))]
    async fn extract_symbol(
        &self,
        company_name: &str,
        context: &str,
    ) -> insight_core::Result<Option<String>> {
        let prompt = prompts::ticker_extraction_prompt(company_name, context);
        let answer = self.complete(prompts::TICKER_SYSTEM_PROMPT, prompt).await?;

        let parsed: TickerAnswer = serde_json::from_str(strip_code_fences(&answer))?;
        Ok(parsed
            .ticker
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty()))
    }
}

/// Remove markdown code fences the model may wrap its JSON in
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
