//! Hierarchical metrics namespace

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::utils::error::{AgentError, Result};

use super::distribution::LatencyDistribution;
use super::gauge::Gauge;

/// An instrument mounted at one path
#[derive(Debug)]
enum Instrument {
    Distribution(Arc<LatencyDistribution>),
    Gauge(Arc<Gauge>),
}

/// Process-wide metrics sink.
///
/// Every instrument is keyed by its full slash-joined path. Mounting two
/// instruments at the same path is an error; a duplicate probe registration
/// surfaces here rather than in the registry that triggered it.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    instruments: RwLock<BTreeMap<String, Instrument>>,
}

impl MetricsRegistry {
    /// Create an empty sink. Only one should be created per process.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Carve a scope rooted at `path`
    pub fn scope(self: &Arc<Self>, path: &str) -> MetricsScope {
        MetricsScope {
            registry: Arc::clone(self),
            path: normalize(path),
        }
    }

    /// Whether any instrument is mounted at or under `path`
    pub fn contains_path(&self, path: &str) -> bool {
        let prefix = normalize(path);
        self.instruments
            .read()
            .keys()
            .any(|k| k == &prefix || k.starts_with(&format!("{}/", prefix)))
    }

    /// Number of mounted instruments
    pub fn len(&self) -> usize {
        self.instruments.read().len()
    }

    /// Whether the sink is empty
    pub fn is_empty(&self) -> bool {
        self.instruments.read().is_empty()
    }

    /// Plain-text exposition of every instrument, one reading per line,
    /// ordered by path.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (path, instrument) in self.instruments.read().iter() {
            match instrument {
                Instrument::Gauge(gauge) => {
                    let _ = writeln!(out, "{} {}", path, gauge.get());
                }
                Instrument::Distribution(dist) => {
                    let snapshot = dist.snapshot();
                    let _ = writeln!(out, "{}/count {}", path, snapshot.count);
                    let _ = writeln!(out, "{}/average-ms {:.3}", path, snapshot.average_ms);
                    let _ = writeln!(out, "{}/min-ms {:.3}", path, snapshot.min_ms);
                    let _ = writeln!(out, "{}/max-ms {:.3}", path, snapshot.max_ms);
                    let _ = writeln!(out, "{}/p50-ms {:.3}", path, snapshot.p50_ms);
                    let _ = writeln!(out, "{}/p95-ms {:.3}", path, snapshot.p95_ms);
                    let _ = writeln!(out, "{}/p99-ms {:.3}", path, snapshot.p99_ms);
                }
            }
        }
        out
    }

    /// Snapshots of every mounted distribution, ordered by path
    pub fn distribution_snapshots(&self) -> Vec<super::LatencySnapshot> {
        self.instruments
            .read()
            .values()
            .filter_map(|instrument| match instrument {
                Instrument::Distribution(dist) => Some(dist.snapshot()),
                Instrument::Gauge(_) => None,
            })
            .collect()
    }

    fn mount(&self, path: String, instrument: Instrument) -> Result<()> {
        let mut instruments = self.instruments.write();
        if instruments.contains_key(&path) {
            return Err(AgentError::Metrics(format!(
                "instrument already mounted at {}",
                path
            )));
        }
        instruments.insert(path, instrument);
        Ok(())
    }
}

/// A directory carved out of the metrics namespace.
///
/// Handed to probes at registration so they can mount their own instruments
/// without seeing the rest of the namespace.
#[derive(Debug, Clone)]
pub struct MetricsScope {
    registry: Arc<MetricsRegistry>,
    path: String,
}

impl MetricsScope {
    /// Normalized path this scope is rooted at
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Carve a child scope
    pub fn subscope(&self, path: &str) -> MetricsScope {
        MetricsScope {
            registry: Arc::clone(&self.registry),
            path: self.join(path),
        }
    }

    /// Mount a new latency distribution named `name` under this scope.
    ///
    /// Fails if an instrument is already mounted at the resulting path.
    pub fn new_latency_distribution(&self, name: &str) -> Result<Arc<LatencyDistribution>> {
        let path = self.join(name);
        let dist = Arc::new(LatencyDistribution::new(path.clone()));
        self.registry
            .mount(path, Instrument::Distribution(Arc::clone(&dist)))?;
        Ok(dist)
    }

    /// Mount a new gauge named `name` under this scope.
    pub fn new_gauge(&self, name: &str) -> Result<Arc<Gauge>> {
        let path = self.join(name);
        let gauge = Arc::new(Gauge::new(path.clone()));
        self.registry
            .mount(path, Instrument::Gauge(Arc::clone(&gauge)))?;
        Ok(gauge)
    }

    fn join(&self, name: &str) -> String {
        let name = normalize(name);
        if self.path.is_empty() {
            name
        } else if name.is_empty() {
            self.path.clone()
        } else {
            format!("{}/{}", self.path, name)
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}
