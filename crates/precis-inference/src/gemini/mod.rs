//! Gemini inference backend.
//!
//! Talks to the Generative Language REST API
//! (`POST {base}/models/{model}:generateContent`). Free-text generation and
//! schema-constrained JSON generation use separately configured models.
//!
//! # Example
//!
//! ```rust,no_run
//! use precis_core::GenerationBackend;
//! use precis_inference::gemini::{GeminiBackend, GeminiConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables (GEMINI_API_KEY, GEMINI_MODEL, ...)
//!     let backend = GeminiBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = GeminiConfig {
//!         api_key: Some("...".to_string()),
//!         ..Default::default()
//!     };
//!     let backend = GeminiBackend::new(config).unwrap();
//!
//!     let text = backend.generate("Say hello").await.unwrap();
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{GeminiBackend, GeminiConfig, API_KEY_HEADER};
pub use error::{to_precis_error, GeminiErrorCode};
pub use types::*;
