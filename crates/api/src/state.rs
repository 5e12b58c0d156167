//! Shared application state handed to every handler.

use crate::config::{MetricsFormat, ServiceConfig};
use crate::readiness::Readiness;

/// Name of the built-in probe cleared on shutdown.
pub const TRAFFIC_PROBE: &str = "accepting_traffic";

/// Read-only state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    pub service: ServiceConfig,
    pub readiness: Readiness,
    pub metrics_format: MetricsFormat,
}

impl AppState {
    pub fn new(
        service: ServiceConfig,
        readiness: Readiness,
        metrics_format: MetricsFormat,
    ) -> Self {
        Self {
            service,
            readiness,
            metrics_format,
        }
    }
}
