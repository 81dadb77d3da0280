//! Probe capability contracts and registry entries

use actix_web::HttpRequest;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics::{LatencyDistribution, MetricsScope};
use crate::utils::error::Result;

/// The contract every attached probe satisfies: run one check.
///
/// The `as_*` accessors are explicit capability queries. A probe advertises
/// an optional capability by overriding the accessor to return itself; the
/// registry checks them at registration and render time instead of guessing.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Run one check, returning a descriptive error on failure.
    async fn probe(&self) -> Result<()>;

    /// Self-registration capability, invoked exactly once at attachment.
    fn as_register_prober(&self) -> Option<&dyn RegisterProber> {
        None
    }

    /// Plain HTML render capability.
    fn as_html_writer(&self) -> Option<&dyn HtmlWriter> {
        None
    }

    /// Request-aware HTML render capability.
    fn as_request_html_writer(&self) -> Option<&dyn RequestHtmlWriter> {
        None
    }
}

/// A probe that mounts additional instruments under its metrics scope.
pub trait RegisterProber: Send + Sync {
    /// Called once, at attachment time. A failure is a wiring error and
    /// aborts startup rather than degrading silently.
    fn register(&self, scope: &MetricsScope) -> Result<()>;
}

/// A probe that can write an HTML snippet about itself.
pub trait HtmlWriter: Send + Sync {
    /// Append a self-describing fragment to `writer`.
    fn write_html(&self, writer: &mut String);
}

/// A probe whose HTML snippet depends on the inbound request, e.g. to vary
/// its output by query parameter.
pub trait RequestHtmlWriter: Send + Sync {
    /// Append a self-describing fragment to `writer` for `req`.
    fn request_write_html(&self, writer: &mut String, req: &HttpRequest);
}

/// One attached probe with its scheduling parameters and metrics handle.
pub struct ProberEntry {
    pub(super) prober: Arc<dyn Prober>,
    pub(super) name: String,
    pub(super) interval_secs: u8,
    pub(super) probe_start_time: RwLock<Option<Instant>>,
    pub(super) latency: Arc<LatencyDistribution>,
}

impl ProberEntry {
    /// Name derived from the registration path
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requested probing period; 0 defers to the registry-wide default
    pub fn interval_secs(&self) -> u8 {
        self.interval_secs
    }

    /// This entry's own latency distribution
    pub fn latency(&self) -> &Arc<LatencyDistribution> {
        &self.latency
    }

    /// Resolve the period this entry's loop runs at. Resolution happens at
    /// scheduling time so a default changed before the loops start is
    /// observed.
    pub(super) fn effective_interval(&self, default_secs: u64) -> Duration {
        if self.interval_secs > 0 {
            Duration::from_secs(u64::from(self.interval_secs))
        } else {
            Duration::from_secs(default_secs)
        }
    }
}
