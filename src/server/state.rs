//! Application state shared across HTTP handlers

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::metrics::MetricsRegistry;
use crate::prober::ProberList;

/// HTTP server state shared across handlers.
///
/// All fields are wrapped in Arc for efficient sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Agent configuration (shared read-only)
    pub config: Arc<Config>,
    /// Probe registry
    pub probers: Arc<ProberList>,
    /// Metrics sink
    pub metrics: Arc<MetricsRegistry>,
    /// Process start time, for uptime reporting
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Arc<Config>,
        probers: Arc<ProberList>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            config,
            probers,
            metrics,
            start_time: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
