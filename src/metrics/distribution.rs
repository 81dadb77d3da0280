//! Cumulative latency distributions

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::time::Duration;

/// Maximum number of samples retained for percentile estimation
const MAX_SAMPLES: usize = 10_000;

/// Sample storage consolidated behind a single lock
#[derive(Debug, Default)]
struct DistributionStorage {
    count: u64,
    sum_ms: f64,
    min_ms: f64,
    max_ms: f64,
    samples: VecDeque<f64>,
}

/// A named cumulative distribution of latencies.
///
/// Count, sum, min and max are cumulative over the process lifetime; a
/// bounded window of recent samples backs the percentile estimates.
#[derive(Debug)]
pub struct LatencyDistribution {
    name: String,
    storage: RwLock<DistributionStorage>,
}

/// Point-in-time view of a distribution
#[derive(Debug, Clone, serde::Serialize)]
pub struct LatencySnapshot {
    /// Full instrument path
    pub name: String,
    /// Total samples recorded
    pub count: u64,
    /// Mean over all recorded samples
    pub average_ms: f64,
    /// Smallest sample seen
    pub min_ms: f64,
    /// Largest sample seen
    pub max_ms: f64,
    /// Median of the retained sample window
    pub p50_ms: f64,
    /// 95th percentile of the retained sample window
    pub p95_ms: f64,
    /// 99th percentile of the retained sample window
    pub p99_ms: f64,
}

impl LatencyDistribution {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            storage: RwLock::new(DistributionStorage::default()),
        }
    }

    /// Instrument path this distribution is mounted at
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record one elapsed-time sample
    pub fn add_sample(&self, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        let mut storage = self.storage.write();

        storage.count += 1;
        storage.sum_ms += ms;
        if storage.count == 1 || ms < storage.min_ms {
            storage.min_ms = ms;
        }
        if ms > storage.max_ms {
            storage.max_ms = ms;
        }

        if storage.samples.len() >= MAX_SAMPLES {
            storage.samples.pop_front();
        }
        storage.samples.push_back(ms);
    }

    /// Total samples recorded so far
    pub fn count(&self) -> u64 {
        self.storage.read().count
    }

    /// Aggregate view for rendering
    pub fn snapshot(&self) -> LatencySnapshot {
        let storage = self.storage.read();

        // Drop non-finite values before sorting so percentile math stays sane
        let mut sorted: Vec<f64> = storage
            .samples
            .iter()
            .filter(|v| v.is_finite())
            .copied()
            .collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let average_ms = if storage.count > 0 {
            storage.sum_ms / storage.count as f64
        } else {
            0.0
        };

        LatencySnapshot {
            name: self.name.clone(),
            count: storage.count,
            average_ms,
            min_ms: storage.min_ms,
            max_ms: storage.max_ms,
            p50_ms: percentile(&sorted, 0.50),
            p95_ms: percentile(&sorted, 0.95),
            p99_ms: percentile(&sorted, 0.99),
        }
    }
}

/// Interpolated percentile over sorted samples
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if q >= 1.0 {
        return sorted.last().copied().unwrap_or(0.0);
    }

    let index = q * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (index.ceil() as usize).min(sorted.len() - 1);

    if lower == upper {
        sorted.get(lower).copied().unwrap_or(0.0)
    } else {
        let weight = index - lower as f64;
        let lower_val = sorted.get(lower).copied().unwrap_or(0.0);
        let upper_val = sorted.get(upper).copied().unwrap_or(0.0);
        lower_val * (1.0 - weight) + upper_val * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolation() {
        let sorted = vec![10.0, 20.0];
        assert!((percentile(&sorted, 0.5) - 15.0).abs() < 1e-9);
        assert!((percentile(&sorted, 0.95) - 19.5).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 1.0), 20.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }
}
