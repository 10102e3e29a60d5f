//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::analysis::result::AnalysisResult;
use crate::analysis::service::run_analysis;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/analysis
///
/// Sends the session's documents to the scoring oracle. One attempt, no retry.
pub async fn handle_run_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = run_analysis(&state.sessions, state.oracle.as_ref(), id).await?;
    Ok(Json(result))
}

/// GET /api/v1/sessions/:id/analysis
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .sessions
        .with(id, |s| s.result.clone())?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No analysis result for session {id}")))
}
