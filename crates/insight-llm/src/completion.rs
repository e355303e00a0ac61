//! Completion request and response types

use serde::{Deserialize, Serialize};

/// Request for a single-turn text completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// User prompt text
    pub prompt: String,

    /// Optional system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a text completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,

    /// Stop reason (completed, max_tokens, filtered)
    pub stop_reason: StopReason,

    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Reason the LLM stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion (end of turn)
    EndTurn,

    /// Hit max tokens limit
    MaxTokens,

    /// Output blocked by the provider's content filter
    Filtered,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl CompletionRequest {
    /// Create a builder for completion requests
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder::new(model)
    }
}

/// Builder for CompletionRequest
pub struct CompletionRequestBuilder {
    model: String,
    prompt: String,
    system: Option<String>,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl CompletionRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            system: None,
            max_tokens: 1024,
            temperature: None,
        }
    }

    /// Set the user prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the completion request
    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            prompt: self.prompt,
            system: self.system,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = CompletionRequest::builder("gemini-2.0-flash")
            .prompt("Classify this text")
            .system("You are a financial analyst")
            .max_tokens(2048)
            .temperature(0.2)
            .build();

        assert_eq!(request.model, "gemini-2.0-flash");
        assert_eq!(request.prompt, "Classify this text");
        assert_eq!(request.max_tokens, 2048);
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
