//! Route table and middleware stack.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    handlers::{health_check, method_not_allowed, refine_summary, structured_summary},
    AppState,
};

/// Generates UUIDv7 request IDs for time-ordered request tracing.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Parse a comma-separated origin list, skipping invalid entries.
///
/// ```text
/// ALLOWED_ORIGINS=https://app.example.com,http://localhost:5173
/// ```
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// Permissive CORS unless a whitelist is configured.
pub fn cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let permissive = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let Some(origins) = allowed_origins else {
        return permissive;
    };
    let origins = parse_allowed_origins(origins);
    if origins.is_empty() {
        warn!("ALLOWED_ORIGINS has no valid entries, allowing any origin");
        return permissive;
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

/// Build the application router.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/ask",
            post(refine_summary).fallback(method_not_allowed),
        )
        .route(
            "/api/structured-summary",
            post(structured_summary).fallback(method_not_allowed),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(config.allowed_origins.as_deref()))
        // Json extractors otherwise stop at axum's own 2 MiB default.
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .with_state(state)
}
