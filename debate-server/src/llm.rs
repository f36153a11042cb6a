//! Upstream text-generation client.
//!
//! Both pipeline stages call the generator through the [`TextGenerator`]
//! trait so tests can substitute an in-process fake. The production
//! implementation speaks to the Gemini `generateContent` REST endpoint.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default Gemini REST endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors from text-generation requests.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {body}")]
    BadStatus { status: u16, body: String },

    #[error("Response contained no text candidate")]
    EmptyResponse,
}

/// Text generator invoked for claim extraction and analysis.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free-form text for `prompt` with the named model.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini-backed [`TextGenerator`].
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client for the given endpoint base. Fails when the API
    /// key is empty, so a misconfigured server dies at startup instead
    /// of per-request.
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request_body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::BadStatus { status, body });
        }

        let resp_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let text = resp_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(LlmError::EmptyResponse)?
            .to_string();

        debug!(model, response_chars = text.len(), "Generator response received");
        Ok(text)
    }
}
