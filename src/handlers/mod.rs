//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Notes API.

use axum::{extract::State, response::Json};

use crate::db;
use crate::error::{ApiError, ErrorType};
use crate::server::AppState;

pub mod notes;
pub mod types;

use types::MessageResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthcheck",
    responses(
        (status = 200, description = "Service is alive", body = MessageResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new("OK"))
}

/// Readiness probe that verifies the database answers
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Service is ready", body = MessageResponse),
        (status = 503, description = "Database unavailable", body = ApiError)
    ),
    tag = "health"
)]
pub async fn readiness(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    db::health_check(&state.db).await.map_err(|err| {
        tracing::warn!(error = %err, "readiness check failed");
        ApiError::from(ErrorType::ServiceUnavailable)
    })?;

    Ok(Json(MessageResponse::new("ready")))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ErrorType::NotFound.into()
}
