use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::{MaqalError, Result};

/// A remote model that turns a prompt into response text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => Err(MaqalError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ))),
    }
}
