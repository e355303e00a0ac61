//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Implementations of this trait provide access to different LLM services
/// (e.g., Gemini, OpenAI-compatible APIs).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion from the LLM
    ///
    /// # Arguments
    ///
    /// * `request` - The completion request with prompt and parameters
    ///
    /// # Returns
    ///
    /// The completion response with the generated text and metadata
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "gemini", "openai")
    fn name(&self) -> &str;
}
