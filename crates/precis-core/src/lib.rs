//! # precis-core
//!
//! Core types, traits, and abstractions for precis.
//!
//! This crate provides the request/response models, the paragraph analysis
//! schema and validator, the per-client usage table and the generation
//! backend trait that the other precis crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod schema;
pub mod traits;
pub mod usage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{StructuredRequest, SummaryRequest, SummaryResponse};
pub use schema::{
    paragraph_analysis_schema, parse_paragraph_analysis, IssueCode, ParagraphAnalysis,
    PathSegment, SchemaIssue,
};
pub use traits::GenerationBackend;
pub use usage::{UsageDecision, UsageTable};
