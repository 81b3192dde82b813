//! Review endpoints.

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::models::{ReviewState, ReviewStats};
use crate::service::ReviewOutcome;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub item_id: String,
    pub grade: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Submit a graded review.
/// POST /api/v1/review
pub async fn submit_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Json<ReviewOutcome>> {
    let Json(request) = payload
        .map_err(|rejection| ApiError::bad_request("MALFORMED_INPUT", rejection.body_text()))?;

    let outcome = state.service.review(&request.item_id, request.grade)?;
    Ok(Json(outcome))
}

/// GET /api/v1/state/:item_id
pub async fn get_state(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ReviewState>> {
    Ok(Json(state.service.state(&item_id)?))
}

/// GET /api/v1/due
pub async fn get_due_items(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.service.due_items()?))
}

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<ReviewStats>> {
    Ok(Json(state.service.stats()?))
}

/// DELETE /api/v1/reset/:item_id
pub async fn reset_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.service.reset(&item_id)?;
    Ok(Json(MessageResponse {
        message: "Item reset successfully".to_string(),
    }))
}

/// Full state snapshot, in the format read by `REVIEW_IMPORT_PATH`.
/// GET /api/v1/export
pub async fn export_states(State(state): State<AppState>) -> ApiResult<Json<Vec<ReviewState>>> {
    Ok(Json(state.service.export_snapshot()?))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
