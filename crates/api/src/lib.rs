//! HTTP service exposing health, readiness, metrics and a message-processing
//! endpoint, used to validate deployment pipelines.
//!
//! Every handler is a pure function of the request, the wall clock and the
//! [`ServiceConfig`](config::ServiceConfig) frozen at startup. Structured
//! logging goes through `tracing`.

pub mod clock;
pub mod config;
pub mod error;
pub mod readiness;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::ApiError;
use readiness::{Readiness, ToggleProbe};
use routes::paths;
use state::{AppState, TRAFFIC_PROBE};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route(paths::ROOT, get(routes::root::index))
        .route(paths::HEALTH, get(routes::health::check))
        .route(paths::READY, get(routes::health::ready))
        .route(paths::METRICS, get(routes::metrics::get))
        .route(paths::PROCESS, post(routes::process::process))
        .route(paths::INFO, get(routes::info::get))
        .fallback(not_found)
        .with_state(state);
    apply_layers(router)
}

/// Wraps a router in the service's middleware stack.
pub fn apply_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state from configuration.
///
/// Registers the `accepting_traffic` probe and returns its handle so the
/// server can report itself unready once shutdown begins.
pub fn create_default_state(config: &Config) -> (Arc<AppState>, ToggleProbe) {
    let traffic = ToggleProbe::new(TRAFFIC_PROBE, true);
    let readiness = Readiness::new().with_probe(traffic.clone());
    let state = Arc::new(AppState::new(
        config.service(),
        readiness,
        config.metrics_format,
    ));
    (state, traffic)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
