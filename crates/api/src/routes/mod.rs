//! HTTP route handlers.

pub mod health;
pub mod info;
pub mod metrics;
pub mod process;
pub mod root;

/// Public paths advertised by `/` and `/api/info`.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const HEALTH: &str = "/health";
    pub const READY: &str = "/ready";
    pub const METRICS: &str = "/metrics";
    pub const DOCS: &str = "/docs";
    pub const PROCESS: &str = "/api/process";
    pub const INFO: &str = "/api/info";
}

/// Display name of the service.
pub const APPLICATION_NAME: &str = "DevOps Pipeline Demo API";
