//! HTTP handlers for precis-api.

pub mod ask;
pub mod health;
pub mod structured;

pub use ask::refine_summary;
pub use health::health_check;
pub use structured::structured_summary;

use crate::ApiError;

/// Fallback for unsupported methods on the API routes.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
