//! Gemini AI provider implementation.
//!
//! Calls `models/{model}:generateContent` once per prompt with a JSON response
//! schema and returns the first candidate's first text part.

use super::{ProviderError, TextProvider};
use crate::services::metrics;
use crate::services::prompt::StructuredPrompt;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const PROVIDER_NAME: &str = "gemini";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    pub timeout: Option<Duration>,
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the generateContent URL. The key is sent as a query parameter.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn call_gemini_api(&self, request: &GenerateContentRequest) -> Result<String, ProviderError> {
        // reqwest errors embed the URL, which carries the key; strip it before logging.
        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.config.api_key.expose_secret().as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "Gemini API error");
            return Err(ProviderError::Api {
                status,
                body: error_text,
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        extract_text(api_response).ok_or(ProviderError::EmptyResult)
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    #[tracing::instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<String, ProviderError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!(
            prompt_len = prompt.user_prompt.len(),
            "Sending request to Gemini API"
        );

        let started = Instant::now();
        let result = self.call_gemini_api(&request).await;
        metrics::record_provider_latency(
            PROVIDER_NAME,
            &self.config.model,
            started.elapsed().as_secs_f64(),
        );

        match &result {
            Ok(text) => tracing::debug!(response_len = text.len(), "Gemini API call succeeded"),
            Err(e) => {
                metrics::record_provider_error(PROVIDER_NAME, e.kind());
                tracing::warn!(error = %e, "Gemini API call failed");
            }
        }

        result
    }
}

/// First candidate, first part, its text. Empty text counts as absent.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &StructuredPrompt) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(&prompt.user_prompt)],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text(&prompt.system_instruction)],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: prompt.response_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

// Every level is optional: a missing or null field means "no content".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}
