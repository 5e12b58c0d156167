//! Application configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::clock;

/// Output format of the `tracing` fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// How `GET /metrics` carries the exposition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsFormat {
    /// Exposition text encoded as a JSON string body.
    #[default]
    Json,
    /// Raw exposition text with the Prometheus content type.
    Text,
}

impl FromStr for MetricsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(MetricsFormat::Json),
            "text" | "plain" => Ok(MetricsFormat::Text),
            other => Err(format!("unknown metrics format: {other}")),
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `text` or `json` (default: `text`)
/// - `METRICS_FORMAT` — `json` or `text` (default: `json`)
/// - `APP_VERSION` — reported service version (default: `"1.0.0"`)
/// - `ENVIRONMENT` — deployment environment name (default: `"development"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub metrics_format: MetricsFormat,
    pub version: String,
    pub environment: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Unparseable values fall back to their defaults rather than failing startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: std::env::var("LOG_FORMAT")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.log_format),
            metrics_format: std::env::var("METRICS_FORMAT")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.metrics_format),
            version: std::env::var("APP_VERSION").unwrap_or(defaults.version),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Freezes the identity part of this configuration, stamping the start time.
    pub fn service(&self) -> ServiceConfig {
        ServiceConfig::new(self.version.clone(), self.environment.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_format: MetricsFormat::Json,
            version: "1.0.0".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Process-wide service identity, fixed at startup.
///
/// Uptime is measured against a monotonic clock so it never decreases,
/// while `started_at` records the wall-clock start for reporting.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    version: String,
    environment: String,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl ServiceConfig {
    /// Creates a service config whose uptime starts now.
    pub fn new(version: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            environment: environment.into(),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since startup, full precision.
    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Seconds since startup, rounded to two decimals for JSON payloads.
    pub fn uptime_seconds_rounded(&self) -> f64 {
        clock::round2(self.uptime_seconds())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Config::default().service()
    }
}
