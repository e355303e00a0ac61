//! OpenAI-compatible provider implementation
//!
//! This module implements the LlmProvider trait for OpenAI's chat
//! completions API and compatible servers.
//! See: https://platform.openai.com/docs/api-reference/chat

use crate::{CompletionRequest, CompletionResponse, LlmProvider, Result, StopReason, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI chat completions provider
///
/// Works against api.openai.com and any server exposing the same
/// chat-completions surface.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, OPENAI_API_BASE.to_string())
    }

    /// Create a provider pointed at a custom base URL
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Create a provider from environment variable
    ///
    /// Reads the API key from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            crate::LlmError::ConfigurationError(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::new(api_key)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to OpenAI-compatible API");

        let mut messages = Vec::new();
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt,
        });

        let openai_request = OpenAiRequest {
            model: request.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LlmError::AuthenticationFailed,
                429 => crate::LlmError::RateLimitExceeded(error_text),
                400 => crate::LlmError::InvalidRequest(error_text),
                404 => crate::LlmError::ModelNotFound(openai_request.model),
                _ => crate::LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: OpenAiResponse = response.json().await.map_err(|e| {
            crate::LlmError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            crate::LlmError::UnexpectedResponse("Response contained no choices".to_string())
        })?;

        let usage = openai_response.usage.unwrap_or_default();

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            choice.finish_reason, usage.prompt_tokens, usage.completion_tokens
        );

        Ok(CompletionResponse {
            text: choice.message.content,
            stop_reason: match choice.finish_reason.as_str() {
                "stop" => StopReason::EndTurn,
                "length" => StopReason::MaxTokens,
                "content_filter" => StopReason::Filtered,
                other => {
                    debug!("Unknown finish reason: {}", other);
                    StopReason::EndTurn
                }
            },
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI-specific request/response types
// These match the chat completions API format exactly

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "openai");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "choices": [{
                "message": {"role": "assistant", "content": "neutral"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }"#;

        let parsed: OpenAiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "neutral");
        assert_eq!(parsed.choices[0].finish_reason, "stop");
    }
}
