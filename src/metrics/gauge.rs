//! Point-in-time gauges

use std::sync::atomic::{AtomicU64, Ordering};

/// A single unsigned gauge value, safe for lock-free concurrent updates.
///
/// Probes that self-register instruments use gauges for point-in-time
/// readings such as free bytes on a filesystem.
#[derive(Debug)]
pub struct Gauge {
    name: String,
    value: AtomicU64,
}

impl Gauge {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AtomicU64::new(0),
        }
    }

    /// Instrument path this gauge is mounted at
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the current reading
    pub fn set(&self, value: u64) {
        self.value.store(value, Ordering::Release);
    }

    /// Current reading
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}
