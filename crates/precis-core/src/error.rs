//! Error types for precis.

use thiserror::Error;

use crate::schema::SchemaIssue;

/// Result type alias using precis's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for precis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (missing or empty required field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Per-client usage limit reached
    #[error("Limit reached ({limit} calls per user)")]
    RateLimited { client: String, limit: u64 },

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Model output was not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output did not match the declared shape
    #[error("Schema validation failed: {} issue(s)", .0.len())]
    SchemaValidation(Vec<SchemaIssue>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
