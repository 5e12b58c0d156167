//! Readiness probes consulted by `GET /ready`.
//!
//! A [`Readiness`] holds an ordered list of probes. The service is ready when
//! every probe passes; an empty list is always ready. Real dependency checks
//! (databases, caches, downstream APIs) plug in by implementing
//! [`ReadinessProbe`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// Reason a probe reported the service as not ready.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("{0}")]
    Unavailable(String),
}

/// A single readiness check.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Returns `Ok(())` when the checked dependency can serve traffic.
    async fn check(&self) -> Result<(), ProbeError>;
}

/// A probe that failed during [`Readiness::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub probe: String,
    pub error: ProbeError,
}

/// Ordered set of readiness probes.
#[derive(Clone, Default)]
pub struct Readiness {
    probes: Vec<Arc<dyn ReadinessProbe>>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a probe; probes run in registration order.
    pub fn with_probe(mut self, probe: impl ReadinessProbe + 'static) -> Self {
        self.probes.push(Arc::new(probe));
        self
    }

    pub fn register(&mut self, probe: Arc<dyn ReadinessProbe>) {
        self.probes.push(probe);
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Runs every probe and collects the failures. Empty means ready.
    pub async fn evaluate(&self) -> Vec<ProbeFailure> {
        let mut failures = Vec::new();
        for probe in &self.probes {
            if let Err(error) = probe.check().await {
                failures.push(ProbeFailure {
                    probe: probe.name().to_string(),
                    error,
                });
            }
        }
        failures
    }
}

impl std::fmt::Debug for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.probes.iter().map(|p| p.name()))
            .finish()
    }
}

/// Probe with a fixed outcome.
#[derive(Debug, Clone)]
pub struct StaticProbe {
    name: String,
    ready: bool,
}

impl StaticProbe {
    pub fn ready(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: true,
        }
    }

    pub fn not_ready(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: false,
        }
    }
}

#[async_trait]
impl ReadinessProbe for StaticProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<(), ProbeError> {
        if self.ready {
            Ok(())
        } else {
            Err(ProbeError::Unavailable(format!("{} is not ready", self.name)))
        }
    }
}

/// Probe backed by a shared flag. Clones observe the same flag.
///
/// The server registers one of these as `accepting_traffic` and clears it
/// when shutdown begins, so orchestrators stop routing while requests drain.
#[derive(Debug, Clone)]
pub struct ToggleProbe {
    name: Arc<str>,
    ready: Arc<AtomicBool>,
}

impl ToggleProbe {
    pub fn new(name: &str, ready: bool) -> Self {
        Self {
            name: Arc::from(name),
            ready: Arc::new(AtomicBool::new(ready)),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessProbe for ToggleProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<(), ProbeError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ProbeError::Unavailable(format!(
                "{} is switched off",
                self.name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_readiness_is_ready() {
        let readiness = Readiness::new();
        assert!(readiness.is_empty());
        assert!(readiness.evaluate().await.is_empty());
    }

    #[tokio::test]
    async fn collects_every_failure_in_order() {
        let readiness = Readiness::new()
            .with_probe(StaticProbe::not_ready("database"))
            .with_probe(StaticProbe::ready("cache"))
            .with_probe(StaticProbe::not_ready("queue"));

        let failures = readiness.evaluate().await;
        let names: Vec<_> = failures.iter().map(|f| f.probe.as_str()).collect();
        assert_eq!(names, ["database", "queue"]);
        assert_eq!(
            failures[0].error,
            ProbeError::Unavailable("database is not ready".to_string())
        );
    }

    #[tokio::test]
    async fn toggle_probe_clones_share_state() {
        let probe = ToggleProbe::new("accepting_traffic", true);
        let mut readiness = Readiness::new();
        readiness.register(Arc::new(probe.clone()));

        assert!(readiness.evaluate().await.is_empty());

        probe.set_ready(false);
        let failures = readiness.evaluate().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].probe, "accepting_traffic");

        probe.set_ready(true);
        assert!(readiness.evaluate().await.is_empty());
    }

    #[test]
    fn debug_lists_probe_names() {
        let readiness = Readiness::new().with_probe(StaticProbe::ready("cache"));
        assert_eq!(format!("{readiness:?}"), r#"["cache"]"#);
    }
}
