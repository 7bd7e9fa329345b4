//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use precis_core::GenerationBackend;
//! use precis_inference::mock::MockGenerationBackend;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let backend = MockGenerationBackend::new().with_fixed_response("Test response");
//! assert_eq!(backend.generate("prompt").await.unwrap(), "Test response");
//! assert_eq!(backend.generate_call_count(), 1);
//! # }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use precis_core::{Error, GenerationBackend, Result};

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_response: String,
    structured_response: String,
    failure: Option<String>,
    latency_ms: u64,
}

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub schema: Option<Value>,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_response: "Mock response".to_string(),
            structured_response: "{}".to_string(),
            failure: None,
            latency_ms: 0,
        }
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the text returned by `generate`.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Set the raw text returned by `generate_structured`.
    pub fn with_structured_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).structured_response = response.into();
        self
    }

    /// Make every call fail with an inference error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(message.into());
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    fn calls(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
        self.call_log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls().clone()
    }

    /// Get number of `generate` calls.
    pub fn generate_call_count(&self) -> usize {
        self.count("generate")
    }

    /// Get number of `generate_structured` calls.
    pub fn structured_call_count(&self) -> usize {
        self.count("generate_structured")
    }

    /// Total number of calls of any kind.
    pub fn total_call_count(&self) -> usize {
        self.calls().len()
    }

    fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str, schema: Option<&Value>) {
        self.calls().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            schema: schema.cloned(),
            timestamp: std::time::Instant::now(),
        });
    }

    async fn simulate(&self) -> Result<()> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
        match &self.config.failure {
            Some(message) => Err(Error::Inference(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt, None);
        self.simulate().await?;
        Ok(self.config.default_response.clone())
    }

    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<String> {
        self.log_call("generate_structured", prompt, Some(schema));
        self.simulate().await?;
        Ok(self.config.structured_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn structured_model_name(&self) -> &str {
        "mock-structured"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_generate() {
        let backend = MockGenerationBackend::new().with_fixed_response("Custom response");

        let response = backend.generate("test prompt").await.unwrap();
        assert_eq!(response, "Custom response");
    }

    #[tokio::test]
    async fn test_mock_backend_structured() {
        let backend = MockGenerationBackend::new().with_structured_response(r#"{"a":1}"#);
        let schema = serde_json::json!({ "type": "OBJECT" });

        let response = backend.generate_structured("p", &schema).await.unwrap();
        assert_eq!(response, r#"{"a":1}"#);
        assert_eq!(backend.get_calls()[0].schema.as_ref(), Some(&schema));
    }

    #[tokio::test]
    async fn test_mock_backend_call_logging() {
        let backend = MockGenerationBackend::new();
        let schema = serde_json::json!({});

        backend.generate("one").await.unwrap();
        backend.generate("two").await.unwrap();
        backend.generate_structured("three", &schema).await.unwrap();

        assert_eq!(backend.generate_call_count(), 2);
        assert_eq!(backend.structured_call_count(), 1);
        assert_eq!(backend.total_call_count(), 3);
        assert_eq!(backend.get_calls()[1].input, "two");
    }

    #[tokio::test]
    async fn test_mock_backend_failure_is_logged_and_returned() {
        let backend = MockGenerationBackend::new().with_failure("upstream down");

        let err = backend.generate("p").await.unwrap_err();
        assert_eq!(err.to_string(), "Inference error: upstream down");
        assert_eq!(backend.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let backend = MockGenerationBackend::new();
        let clone = backend.clone();
        clone.generate("p").await.unwrap();
        assert_eq!(backend.generate_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_backend_latency_simulation() {
        let backend = MockGenerationBackend::new().with_latency_ms(50);

        let start = std::time::Instant::now();
        backend.generate("test").await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed.as_millis() >= 50, "Should simulate latency");
    }
}
