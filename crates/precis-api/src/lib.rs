//! # precis-api
//!
//! HTTP front for precis: summary refinement under a per-client usage limit
//! and schema-validated paragraph analysis.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{AppConfig, ThrottleConfig};
pub use error::ApiError;
pub use extract::ClientId;
pub use router::build_router;
pub use state::{AppState, GlobalRateLimiter};
