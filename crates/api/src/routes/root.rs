//! Welcome endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{APPLICATION_NAME, paths};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub docs: &'static str,
    pub health: &'static str,
}

/// GET / — welcome message with navigation links.
pub async fn index(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {APPLICATION_NAME}"),
        version: state.service.version().to_string(),
        docs: paths::DOCS,
        health: paths::HEALTH,
    })
}
