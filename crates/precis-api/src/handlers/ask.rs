//! Summary refinement endpoint.
//!
//! Each call is counted against the caller's usage before anything else
//! happens, so refused and failed calls still consume quota.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use precis_core::{defaults, SummaryRequest, SummaryResponse};
use precis_inference::refine_summary_prompt;

use crate::{extract::ClientId, ApiError, AppState};

/// Refine an extractive summary into a concise abstractive one.
///
/// # Returns
/// - 200 OK with `{"summary": ...}`
/// - 400 Bad Request if `extractiveSummary` is missing or the body is not JSON
/// - 429 Too Many Requests once the caller is over the usage limit
/// - 500 Internal Server Error if the model call fails
pub async fn refine_summary(
    State(state): State<AppState>,
    client: ClientId,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(request) = payload?;
    let text = request.text()?;

    state.usage.check(client.as_str())?;

    let prompt = refine_summary_prompt(text);

    if state.test_mode {
        info!("Test mode, skipping model call");
        return Ok(Json(SummaryResponse {
            summary: defaults::TEST_MODE_SUMMARY.to_string(),
        }));
    }

    let summary = state.backend.generate(&prompt).await?;
    info!(response_len = summary.len(), "Summary refined");

    Ok(Json(SummaryResponse { summary }))
}
