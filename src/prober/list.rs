//! The probe registry
//!
//! Owns the ordered list of attached probes, carves a metrics scope for each
//! at attachment, and serialises list access against the scheduling and
//! rendering paths. The lock covers list reads and appends only, never probe
//! execution.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info};

use crate::metrics::{LatencyDistribution, MetricsRegistry, MetricsScope};
use crate::utils::error::Result;

use super::types::{Prober, ProberEntry};

/// Name of the latency distribution mounted for the registry as a whole and
/// once more per entry.
const LATENCY_METRIC: &str = "probe-duration";

/// Registry of probes, each run on its own timer once probing starts.
///
/// Only one should be created per process. Metrics describing the operation
/// of the probes themselves (not the readings they collect) are mounted
/// under `path`.
pub struct ProberList {
    pub(super) path: String,
    pub(super) metrics: Arc<MetricsRegistry>,
    pub(super) latency: Arc<LatencyDistribution>,
    pub(super) probers: Mutex<Vec<Arc<ProberEntry>>>,
    pub(super) active: Arc<AtomicBool>,
    pub(super) default_interval_secs: AtomicU64,
}

/// Point-in-time view of one attached probe for the status API
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProbeStatus {
    /// Name derived from the registration path
    pub name: String,
    /// Requested interval; 0 means the registry default applies
    pub interval_secs: u8,
    /// Completed executions
    pub probe_count: u64,
    /// Mean execution latency
    pub average_latency_ms: f64,
    /// Seconds since the most recent execution began, if any
    pub seconds_since_last_start: Option<u64>,
}

impl ProberList {
    /// Create a new registry with its aggregate latency distribution
    /// mounted under `path`.
    pub fn new(metrics: Arc<MetricsRegistry>, path: &str) -> Result<Arc<Self>> {
        let scope = metrics.scope(path);
        let latency = scope.new_latency_distribution(LATENCY_METRIC)?;
        Ok(Arc::new(Self {
            path: scope.path().to_string(),
            metrics,
            latency,
            probers: Mutex::new(Vec::new()),
            active: Arc::new(AtomicBool::new(false)),
            default_interval_secs: AtomicU64::new(0),
        }))
    }

    /// Attach `prober` under `path`. The metrics for the probe are mounted
    /// under `path`; its name is derived from it. The preferred probe
    /// interval in seconds is `interval_secs`; 0 defers to the registry
    /// default, resolved when probing starts.
    ///
    /// `None` is an explicit no-op so callers can conditionally construct a
    /// probe and pass `None` when it is disabled. If the probe exposes the
    /// self-registration capability it is invoked once here; a failure is a
    /// wiring error and propagates to the caller, which should abort startup.
    pub fn add(
        self: &Arc<Self>,
        prober: Option<Arc<dyn Prober>>,
        path: &str,
        interval_secs: u8,
    ) -> Result<()> {
        let Some(prober) = prober else {
            debug!("skipping disabled probe at {}", path);
            return Ok(());
        };
        self.add_prober(prober, path, interval_secs)
    }

    /// Attach a probe built by `factory`, which receives a metrics scope
    /// already carved from `path` so the probe can mount its own instruments
    /// as part of construction. Delegates to the same append logic as
    /// [`add`](Self::add).
    pub fn create_and_add<F>(
        self: &Arc<Self>,
        factory: F,
        path: &str,
        interval_secs: u8,
    ) -> Result<()>
    where
        F: FnOnce(&MetricsScope) -> Result<Arc<dyn Prober>>,
    {
        let scope = self.metrics.scope(path);
        let prober = factory(&scope)?;
        self.add_prober(prober, path, interval_secs)
    }

    fn add_prober(
        self: &Arc<Self>,
        prober: Arc<dyn Prober>,
        path: &str,
        interval_secs: u8,
    ) -> Result<()> {
        let scope = self.metrics.scope(path);
        let latency = scope.new_latency_distribution(LATENCY_METRIC)?;

        if let Some(register) = prober.as_register_prober() {
            register.register(&scope)?;
        }

        let entry = Arc::new(ProberEntry {
            prober,
            name: scope.path().to_string(),
            interval_secs,
            probe_start_time: RwLock::new(None),
            latency,
        });

        self.probers.lock().push(Arc::clone(&entry));
        info!(
            prober = %entry.name,
            interval_secs,
            "probe attached"
        );

        // A probe attached after probing started joins the schedule right
        // away, at the default interval recorded at start.
        if self.active.load(Ordering::Acquire) {
            self.spawn_probe_loop(entry);
        }

        Ok(())
    }

    /// Number of attached probes
    pub fn len(&self) -> usize {
        self.probers.lock().len()
    }

    /// Whether no probes are attached
    pub fn is_empty(&self) -> bool {
        self.probers.lock().is_empty()
    }

    /// Metrics path the registry is mounted under
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Latency distribution aggregated across every probe execution
    pub fn latency(&self) -> &Arc<LatencyDistribution> {
        &self.latency
    }

    /// Point-in-time view of every attached probe, in attachment order
    pub fn statuses(&self) -> Vec<ProbeStatus> {
        self.snapshot()
            .iter()
            .map(|entry| {
                let snapshot = entry.latency.snapshot();
                let last_start = *entry.probe_start_time.read();
                ProbeStatus {
                    name: entry.name.clone(),
                    interval_secs: entry.interval_secs,
                    probe_count: snapshot.count,
                    average_latency_ms: snapshot.average_ms,
                    seconds_since_last_start: last_start.map(|t| t.elapsed().as_secs()),
                }
            })
            .collect()
    }

    /// Consistent snapshot of the entry list. Holding the lock only for the
    /// copy keeps registration serialised against iteration without
    /// serialising probe work.
    pub(super) fn snapshot(&self) -> Vec<Arc<ProberEntry>> {
        self.probers.lock().clone()
    }
}
