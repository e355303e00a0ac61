//! Google Gemini provider implementation
//!
//! This module implements the LlmProvider trait for Google's Gemini models
//! via the generateContent REST endpoint.
//! See: https://ai.google.dev/api/generate-content

use crate::{CompletionRequest, CompletionResponse, LlmProvider, Result, StopReason, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
///
/// Supports the Gemini model family, e.g.:
/// - gemini-2.0-flash
/// - gemini-1.5-pro
pub struct GeminiProvider {
    client: Client,
    api_key: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google AI Studio API key
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Create a provider from environment variable
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            crate::LlmError::ConfigurationError(
                "GEMINI_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::new(api_key)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending request to Gemini API");

        let gemini_request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
                role: None,
            }],
            system_instruction: request.system.map(|text| Content {
                parts: vec![Part { text }],
                role: None,
            }),
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(format!(
                "{GEMINI_API_BASE}/models/{}:generateContent",
                request.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => crate::LlmError::AuthenticationFailed,
                429 => crate::LlmError::RateLimitExceeded(error_text),
                400 => crate::LlmError::InvalidRequest(error_text),
                404 => crate::LlmError::ModelNotFound(request.model),
                _ => crate::LlmError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            crate::LlmError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let candidate = gemini_response.candidates.into_iter().next().ok_or_else(|| {
            crate::LlmError::UnexpectedResponse("Response contained no candidates".to_string())
        })?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = gemini_response.usage_metadata.unwrap_or_default();

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            candidate.finish_reason, usage.prompt_token_count, usage.candidates_token_count
        );

        Ok(CompletionResponse {
            text,
            stop_reason: match candidate.finish_reason.as_str() {
                "STOP" => StopReason::EndTurn,
                "MAX_TOKENS" => StopReason::MaxTokens,
                "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST" => StopReason::Filtered,
                other => {
                    debug!("Unknown finish reason: {}", other);
                    StopReason::EndTurn
                }
            },
            usage: TokenUsage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini-specific request/response types
// These match the generateContent API format exactly

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}
