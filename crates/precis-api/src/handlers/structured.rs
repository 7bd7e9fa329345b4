//! Structured paragraph analysis endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use precis_core::{
    paragraph_analysis_schema, parse_paragraph_analysis, ParagraphAnalysis, StructuredRequest,
};
use precis_inference::paragraph_analysis_prompt;

use crate::{ApiError, AppState};

/// Analyse a summary into `paragraphType`, `mainIdea`, `keyPoints` and `tone`.
///
/// Not subject to the per-client usage limit or test mode.
///
/// # Returns
/// - 200 OK with exactly the four validated fields
/// - 400 Bad Request if `abstractiveSummary` is missing or the body is not JSON
/// - 500 Internal Server Error if the model call fails or its reply is not a
///   valid paragraph analysis
pub async fn structured_summary(
    State(state): State<AppState>,
    payload: Result<Json<StructuredRequest>, JsonRejection>,
) -> Result<Json<ParagraphAnalysis>, ApiError> {
    let Json(request) = payload?;
    let text = request.text()?;

    let prompt = paragraph_analysis_prompt(text);
    let schema = paragraph_analysis_schema();

    let raw = state.backend.generate_structured(&prompt, &schema).await?;
    let analysis = parse_paragraph_analysis(&raw)?;

    info!(
        key_points = analysis.key_points.len(),
        "Paragraph analysis validated"
    );
    Ok(Json(analysis))
}
