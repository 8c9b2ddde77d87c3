use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Settings;
use crate::llm::client::LlmProvider;
use crate::{MaqalError, Result};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const JSON_MIME_TYPE: &str = "application/json";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(MaqalError::Config(
                "Gemini API key is missing. Set llm.api_key in config, MAQAL_GEMINI_API_KEY or GOOGLE_API_KEY."
                    .to_string(),
            ));
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_GEMINI_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout_secs.max(1)))
            .build()
            .map_err(|e| {
                MaqalError::Config(format!("Failed to build Gemini HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key,
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GeminiGenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
            },
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Sending Gemini request");

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| invocation_error("Gemini request failed", e))?;

        let response = response
            .error_for_status()
            .map_err(|e| invocation_error("Gemini returned an error status", e))?;

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .map_err(|e| invocation_error("Failed to read Gemini response", e))?;

        payload
            .candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                MaqalError::ModelInvocation("Gemini response did not contain any text".to_string())
            })
    }
}

/// Strip the query string so the API key never reaches logs or error output.
fn invocation_error(context: &str, err: reqwest::Error) -> MaqalError {
    MaqalError::ModelInvocation(format!("{context}: {}", err.without_url()))
}

#[derive(Debug, Serialize)]
struct GeminiGenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
