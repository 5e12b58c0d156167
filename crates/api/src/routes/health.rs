//! Liveness and readiness endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::clock;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_seconds: f64,
    pub version: String,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub timestamp: String,
}

/// GET /health — liveness with uptime and service identity.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let service = &state.service;
    Json(HealthResponse {
        status: "healthy",
        timestamp: clock::timestamp(),
        uptime_seconds: service.uptime_seconds_rounded(),
        version: service.version().to_string(),
        environment: service.environment().to_string(),
    })
}

/// GET /ready — 200 when every readiness probe passes, 503 otherwise.
#[tracing::instrument(skip(state))]
pub async fn ready(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, ApiError> {
    let failures = state.readiness.evaluate().await;
    if !failures.is_empty() {
        for failure in &failures {
            tracing::error!(
                probe = %failure.probe,
                error = %failure.error,
                "readiness check failed"
            );
        }
        return Err(ApiError::NotReady);
    }

    Ok(Json(ReadinessResponse {
        ready: true,
        timestamp: clock::timestamp(),
    }))
}
