//! Gemini (Generative Language API) backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, trace};

use precis_core::{defaults, Error, GenerationBackend, Result};

use super::error::{to_precis_error, GeminiErrorCode};
use super::types::*;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub base_url: String,
    /// API key. Not checked upfront; a missing key fails at the upstream.
    pub api_key: Option<String>,
    /// Model for free-text generation.
    pub model: String,
    /// Model for schema-constrained generation.
    pub structured_model: String,
    /// Request timeout in seconds (None waits indefinitely).
    pub timeout_seconds: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            api_key: None,
            model: defaults::GEMINI_MODEL.to_string(),
            structured_model: defaults::GEMINI_STRUCTURED_MODEL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl GeminiConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string()),
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| defaults::GEMINI_MODEL.to_string()),
            structured_model: std::env::var("GEMINI_STRUCTURED_MODEL")
                .unwrap_or_else(|_| defaults::GEMINI_STRUCTURED_MODEL.to_string()),
            timeout_seconds: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

/// Gemini generation backend.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new Gemini backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut client_builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(secs));
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing Gemini backend: url={}, model={}, structured={}",
            config.base_url, config.model, config.structured_model
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Issue one `generateContent` call. No retry.
    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let mut req = self.client.post(self.endpoint(model)).json(request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header(API_KEY_HEADER, api_key);
        }

        let start = Instant::now();
        let response = req
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (error_status, message) = match serde_json::from_str::<GeminiErrorResponse>(&body)
            {
                Ok(parsed) => (parsed.error.status.unwrap_or_default(), parsed.error.message),
                Err(_) if !body.trim().is_empty() => (String::new(), body),
                Err(_) => (String::new(), "Unknown error".to_string()),
            };
            let code = GeminiErrorCode::from_response(status.as_u16(), &error_status, &message);
            debug!(
                upstream_status = status.as_u16(),
                ?code,
                "Gemini call failed"
            );
            return Err(to_precis_error(code, status.as_u16(), &message));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Gemini call complete"
        );
        Ok(result)
    }

    fn take_text(response: &GenerateContentResponse) -> Result<String> {
        let text = response.first_text().ok_or_else(|| {
            Error::Inference(format!(
                "No text returned from AI ({})",
                response.empty_reason()
            ))
        })?;
        trace!(response = %text, "Raw model output");
        Ok(text.to_string())
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    #[instrument(skip(self, prompt), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.config.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::user_text(prompt);
        let response = self.send(&self.config.model, &request).await?;
        let text = Self::take_text(&response)?;

        debug!("Generation complete, response length: {}", text.len());
        Ok(text)
    }

    #[instrument(skip(self, prompt, schema), fields(subsystem = "inference", component = "gemini", op = "generate_structured", model = %self.config.structured_model, prompt_len = prompt.len()))]
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<String> {
        let request = GenerateContentRequest::user_text(prompt).with_json_schema(schema);
        let response = self.send(&self.config.structured_model, &request).await?;
        let text = Self::take_text(&response)?;

        debug!("Structured generation complete, response length: {}", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn structured_model_name(&self) -> &str {
        &self.config.structured_model
    }
}
