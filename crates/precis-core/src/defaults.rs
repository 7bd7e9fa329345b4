//! Centralized default constants for precis.
//!
//! All crates reference these constants instead of defining their own magic
//! values.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const HOST: &str = "0.0.0.0";

/// Default listen port.
pub const PORT: u16 = 3000;

/// Default request body limit (100 KiB).
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

// =============================================================================
// USAGE LIMIT
// =============================================================================

/// Calls to the refine endpoint allowed per client for the process lifetime.
pub const USAGE_LIMIT: u64 = 2;

/// Client identifier used when neither a forwarded-for header nor a peer
/// address is available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Canned refine result returned in test mode.
pub const TEST_MODE_SUMMARY: &str = "This is a test summary (no API call).";

// =============================================================================
// GLOBAL THROTTLE
// =============================================================================

/// Requests allowed per period when the global throttle is enabled.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Throttle period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

// =============================================================================
// GEMINI
// =============================================================================

/// Generative Language API root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used to refine extractive summaries.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Model used for schema-constrained paragraph analysis.
pub const GEMINI_STRUCTURED_MODEL: &str = "gemini-2.5-flash";
