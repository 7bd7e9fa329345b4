//! # precis-inference
//!
//! Generative model backends for precis.
//!
//! This crate provides:
//! - Gemini implementation of [`GenerationBackend`]
//! - The fixed prompt templates sent to the model
//! - A mock backend for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Expose [`mock::MockGenerationBackend`] to dependent crates
//!
//! # Example
//!
//! ```rust,no_run
//! use precis_inference::{GeminiBackend, GenerationBackend, refine_summary_prompt};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let prompt = refine_summary_prompt("Cats sleep. Cats hunt.");
//!     let summary = backend.generate(&prompt).await.unwrap();
//! }
//! ```

pub mod gemini;
pub mod prompts;

// Mock generation backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use precis_core::*;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use prompts::{paragraph_analysis_prompt, refine_summary_prompt};
