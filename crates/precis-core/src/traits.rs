//! Core traits for precis abstractions.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation (LLM).
///
/// Each method issues exactly one upstream call; implementations must not
/// retry.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate free text for a prompt with the default model.
    ///
    /// Fails if the reply carries no text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate JSON text constrained by `schema` with the structured model.
    ///
    /// Returns the raw text; parsing and validation are left to the caller.
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<String>;

    /// Model used by [`generate`](Self::generate).
    fn model_name(&self) -> &str;

    /// Model used by [`generate_structured`](Self::generate_structured).
    fn structured_model_name(&self) -> &str;
}
