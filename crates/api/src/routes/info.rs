//! Application information endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::{APPLICATION_NAME, paths};
use crate::state::AppState;

/// Rust toolchain version the package declares (`rust-version`).
const RUST_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub ready: &'static str,
    pub metrics: &'static str,
    pub docs: &'static str,
    pub process: &'static str,
}

impl Endpoints {
    pub const KNOWN: Endpoints = Endpoints {
        health: paths::HEALTH,
        ready: paths::READY,
        metrics: paths::METRICS,
        docs: paths::DOCS,
        process: paths::PROCESS,
    };
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub application: &'static str,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: f64,
    pub rust_version: &'static str,
    pub endpoints: Endpoints,
}

/// GET /api/info — static service description plus live uptime.
pub async fn get(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    let service = &state.service;
    Json(InfoResponse {
        application: APPLICATION_NAME,
        version: service.version().to_string(),
        environment: service.environment().to_string(),
        uptime_seconds: service.uptime_seconds_rounded(),
        rust_version: RUST_VERSION,
        endpoints: Endpoints::KNOWN,
    })
}
