//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LlmProvider trait for
//! various LLM services.

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;

#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;
