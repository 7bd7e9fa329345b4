//! HTTP error responses.
//!
//! Every failure is terminal for its request and rendered as a JSON body
//! carrying `error` and, where available, `details`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use precis_core::SchemaIssue;

#[derive(Debug)]
pub enum ApiError {
    /// Missing required field or unreadable body.
    BadRequest(String),
    /// Body exceeded the configured limit.
    PayloadTooLarge(String),
    /// Per-client usage limit reached.
    RateLimited { limit: u64 },
    /// The model call failed or returned no text.
    Upstream(String),
    /// The model reply was not valid JSON.
    Parse(String),
    /// The model reply did not match the paragraph analysis shape.
    SchemaValidation(Vec<SchemaIssue>),
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Upstream(_) | ApiError::Parse(_) | ApiError::SchemaValidation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<precis_core::Error> for ApiError {
    fn from(err: precis_core::Error) -> Self {
        use precis_core::Error;

        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::RateLimited { limit, .. } => ApiError::RateLimited { limit },
            Error::Parse(msg) => ApiError::Parse(msg),
            Error::SchemaValidation(issues) => ApiError::SchemaValidation(issues),
            Error::Inference(msg) | Error::Request(msg) | Error::Config(msg) => {
                ApiError::Upstream(msg)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Every other body rejection (syntax, content type, field types) is a 400.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::BadRequest(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::BadRequest(msg) | ApiError::PayloadTooLarge(msg) => json!({ "error": msg }),
            ApiError::RateLimited { limit } => json!({
                "error": format!("Limit reached ({} calls per user)", limit),
            }),
            ApiError::Upstream(details) => {
                tracing::error!(error = %details, "Upstream model call failed");
                json!({ "error": "API request failed", "details": details })
            }
            ApiError::Parse(details) => {
                tracing::error!(error = %details, "Model reply is not valid JSON");
                json!({ "error": "Failed to parse AI response", "details": details })
            }
            ApiError::SchemaValidation(issues) => {
                tracing::error!(issues = issues.len(), "Model reply failed schema validation");
                json!({
                    "error": "Schema validation failed",
                    "details": issues,
                    "message": "The AI response doesn't match the expected schema",
                })
            }
            ApiError::MethodNotAllowed => json!({ "error": "Method not allowed" }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use precis_core::Error;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let err: ApiError = Error::InvalidInput("extractiveSummary is required".into()).into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "extractiveSummary is required" }));
    }

    #[tokio::test]
    async fn test_rate_limited_reports_limit() {
        let err: ApiError = Error::RateLimited {
            client: "1.2.3.4".into(),
            limit: 2,
        }
        .into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({ "error": "Limit reached (2 calls per user)" }));
    }

    #[tokio::test]
    async fn test_inference_error_keeps_inner_message() {
        let err: ApiError = Error::Inference("quota exhausted".into()).into();
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "API request failed", "details": "quota exhausted" })
        );
    }

    #[tokio::test]
    async fn test_config_and_request_errors_are_upstream() {
        let cases = [
            (
                Error::Config("Authentication failed (403): denied".into()),
                "Authentication failed (403): denied",
            ),
            (
                Error::Request("Request failed: connection refused".into()),
                "Request failed: connection refused",
            ),
        ];
        for (err, details) in cases {
            let (status, body) = render(err.into()).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "API request failed");
            assert_eq!(body["details"], details);
        }
    }

    #[tokio::test]
    async fn test_parse_error_body() {
        let (status, body) = render(ApiError::Parse("expected value".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to parse AI response");
        assert_eq!(body["details"], "expected value");
    }

    #[tokio::test]
    async fn test_schema_error_lists_issues() {
        let issues = vec![SchemaIssue::missing("tone")];
        let (status, body) = render(ApiError::SchemaValidation(issues)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Schema validation failed");
        assert_eq!(
            body["message"],
            "The AI response doesn't match the expected schema"
        );
        assert_eq!(body["details"][0]["path"], json!(["tone"]));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (status, body) = render(ApiError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}
