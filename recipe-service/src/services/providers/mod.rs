//! AI provider abstractions and implementations.
//!
//! Handlers talk to a `TextProvider` so the Gemini client can be swapped for a
//! mock in tests.

pub mod gemini;
pub mod mock;

use crate::services::prompt::StructuredPrompt;
use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    /// Upstream answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Upstream succeeded but the envelope held no text.
    #[error("Provider returned no text content")]
    EmptyResult,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Api { .. } => "api",
            ProviderError::EmptyResult => "empty_result",
            ProviderError::Network(_) => "network",
            ProviderError::Decode(_) => "decode",
        }
    }
}

/// Trait for structured text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for the prompt, constrained by its response schema.
    ///
    /// Exactly one upstream call is made; there are no retries.
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<String, ProviderError>;
}
