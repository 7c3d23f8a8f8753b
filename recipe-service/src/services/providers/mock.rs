//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use crate::services::prompt::StructuredPrompt;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Mock text provider that answers every prompt with the same outcome and
/// remembers what it was asked.
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    prompts: Mutex<Vec<StructuredPrompt>>,
}

impl MockTextProvider {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<StructuredPrompt> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<String, ProviderError> {
        self.prompts.lock().await.push(prompt.clone());
        self.outcome.clone()
    }
}
