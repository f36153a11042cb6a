//! Server configuration, loaded once at startup.

use thiserror::Error;

use crate::claims::{DEFAULT_ANALYSIS_MODEL, DEFAULT_EXTRACTION_MODEL};
use crate::llm::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// Runtime configuration from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the WebSocket server binds to (`BIND_ADDR`).
    pub bind_addr: String,
    /// Gemini API credential (`GEMINI_API_KEY`, required).
    pub gemini_api_key: String,
    /// Gemini REST endpoint base (`GEMINI_BASE_URL`).
    pub gemini_base_url: String,
    /// Model tier for claim extraction (`EXTRACTION_MODEL`).
    pub extraction_model: String,
    /// Model tier for claim analysis (`ANALYSIS_MODEL`).
    pub analysis_model: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// A missing or empty `GEMINI_API_KEY` fails here so the server
    /// dies at startup rather than erroring on every submission.
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:2000".to_string()),
            gemini_api_key,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            extraction_model: std::env::var("EXTRACTION_MODEL")
                .unwrap_or_else(|_| DEFAULT_EXTRACTION_MODEL.to_string()),
            analysis_model: std::env::var("ANALYSIS_MODEL")
                .unwrap_or_else(|_| DEFAULT_ANALYSIS_MODEL.to_string()),
        })
    }
}
