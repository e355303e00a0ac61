//! LLM completion abstraction for the company insight engine
//!
//! This crate provides a provider-agnostic interface for single-turn text
//! completions. It includes:
//!
//! - Completion request/response types
//! - Provider trait for LLM implementations
//! - Concrete provider implementations (behind feature flags)
//!
//! The engine uses completions for ticker extraction and sentiment
//! classification; there is no tool calling or multi-turn conversation.

pub mod completion;
pub mod error;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use provider::LlmProvider;

// Provider implementations (feature-gated)
#[cfg(any(feature = "gemini", feature = "openai"))]
pub mod providers;
