//! Plate allocation endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::engine::AllocationError;
use crate::state::AppState;

/// Create plate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/random", post(allocate_random))
        .route("/next", post(allocate_next))
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Response for a freshly allocated plate.
#[derive(Debug, Serialize)]
pub struct PlateResponse {
    /// Canonical plate rendering.
    pub plate: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,

    /// Human-readable message.
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Allocate a uniformly random free plate.
///
/// POST /v1/plates/random
async fn allocate_random(State(state): State<AppState>) -> Response {
    match state.engine().allocate_random().await {
        Ok(plate) => (StatusCode::CREATED, Json(PlateResponse { plate })).into_response(),
        Err(err) => allocation_error(&err),
    }
}

/// Allocate the successor of the last issued plate.
///
/// POST /v1/plates/next
async fn allocate_next(State(state): State<AppState>) -> Response {
    match state.engine().allocate_next().await {
        Ok(plate) => (StatusCode::CREATED, Json(PlateResponse { plate })).into_response(),
        Err(err) => allocation_error(&err),
    }
}

fn allocation_error(err: &AllocationError) -> Response {
    let (status, code) = match err {
        AllocationError::SpaceExhausted(_) => (StatusCode::CONFLICT, "space_exhausted"),
        AllocationError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "persistence"),
    };

    error!(error = %err, code, "Plate allocation failed");

    (
        status,
        Json(ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }),
    )
        .into_response()
}
