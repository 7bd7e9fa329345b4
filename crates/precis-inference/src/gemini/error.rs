//! Gemini-specific error handling.

use precis_core::Error;

/// Gemini error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiErrorCode {
    /// Missing or invalid API key.
    AuthenticationError,
    /// Quota or per-minute rate exhausted upstream.
    QuotaExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Malformed request (bad schema, oversized prompt).
    InvalidArgument,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl GeminiErrorCode {
    /// Determine error code from HTTP status and the `error.status` string.
    pub fn from_response(status: u16, error_status: &str, message: &str) -> Self {
        match (status, error_status) {
            (401, _) | (403, _) | (_, "UNAUTHENTICATED") | (_, "PERMISSION_DENIED") => {
                Self::AuthenticationError
            }
            (400, _) if message.contains("API key") => Self::AuthenticationError,
            (429, _) | (_, "RESOURCE_EXHAUSTED") => Self::QuotaExceeded,
            (404, _) | (_, "NOT_FOUND") => Self::ModelNotFound,
            (400, _) | (_, "INVALID_ARGUMENT") => Self::InvalidArgument,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a Gemini error to a precis Error.
pub fn to_precis_error(code: GeminiErrorCode, status: u16, message: &str) -> Error {
    match code {
        GeminiErrorCode::AuthenticationError => {
            Error::Config(format!("Authentication failed ({}): {}", status, message))
        }
        GeminiErrorCode::QuotaExceeded => {
            Error::Inference(format!("Quota exceeded ({}): {}", status, message))
        }
        GeminiErrorCode::ModelNotFound => {
            Error::Config(format!("Model not found ({}): {}", status, message))
        }
        GeminiErrorCode::InvalidArgument => {
            Error::Inference(format!("Invalid request ({}): {}", status, message))
        }
        GeminiErrorCode::ServerError => {
            Error::Inference(format!("Server error ({}): {}", status, message))
        }
        GeminiErrorCode::Unknown => {
            Error::Inference(format!("Gemini returned {}: {}", status, message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_403() {
        let code = GeminiErrorCode::from_response(403, "PERMISSION_DENIED", "denied");
        assert_eq!(code, GeminiErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_from_bad_api_key() {
        let code = GeminiErrorCode::from_response(
            400,
            "INVALID_ARGUMENT",
            "API key not valid. Please pass a valid API key.",
        );
        assert_eq!(code, GeminiErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_from_429() {
        let code = GeminiErrorCode::from_response(429, "RESOURCE_EXHAUSTED", "quota");
        assert_eq!(code, GeminiErrorCode::QuotaExceeded);
    }

    #[test]
    fn test_error_code_from_404() {
        let code = GeminiErrorCode::from_response(404, "NOT_FOUND", "models/x is not found");
        assert_eq!(code, GeminiErrorCode::ModelNotFound);
    }

    #[test]
    fn test_error_code_from_invalid_argument() {
        let code = GeminiErrorCode::from_response(400, "INVALID_ARGUMENT", "bad schema");
        assert_eq!(code, GeminiErrorCode::InvalidArgument);
    }

    #[test]
    fn test_error_code_from_503() {
        let code = GeminiErrorCode::from_response(503, "UNAVAILABLE", "overloaded");
        assert_eq!(code, GeminiErrorCode::ServerError);
    }

    #[test]
    fn test_error_code_from_unknown() {
        let code = GeminiErrorCode::from_response(418, "", "teapot");
        assert_eq!(code, GeminiErrorCode::Unknown);
    }

    #[test]
    fn test_to_precis_error_keeps_message() {
        let err = to_precis_error(GeminiErrorCode::ServerError, 500, "Internal error");
        assert_eq!(err.to_string(), "Inference error: Server error (500): Internal error");
    }

    #[test]
    fn test_to_precis_error_auth_is_config() {
        let err = to_precis_error(GeminiErrorCode::AuthenticationError, 403, "no key");
        assert!(matches!(err, Error::Config(_)));
    }
}
