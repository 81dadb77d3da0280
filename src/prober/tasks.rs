//! Per-probe scheduling loops

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::list::ProberList;
use super::types::ProberEntry;

impl ProberList {
    /// Start one scheduling loop per attached probe.
    ///
    /// Every loop sleeps a full interval before its first execution so a
    /// large registry does not stampede at startup. `default_interval_secs`
    /// applies to entries attached with interval 0 and is resolved here, not
    /// at attachment. Loops run until [`stop_probing`](Self::stop_probing)
    /// or process exit; a probe attached later joins the schedule on its own
    /// loop immediately.
    pub fn start_probing(self: &Arc<Self>, default_interval_secs: u64) {
        // A zero period is not a valid ticker; treat 0 as one second
        let default_interval_secs = default_interval_secs.max(1);
        self.default_interval_secs
            .store(default_interval_secs, Ordering::Release);

        // Starting twice would double-schedule every entry
        if self.active.swap(true, Ordering::AcqRel) {
            warn!("probe scheduling already started");
            return;
        }

        let entries = self.snapshot();
        info!(
            probes = entries.len(),
            default_interval_secs, "starting probe scheduling"
        );
        for entry in entries {
            self.spawn_probe_loop(entry);
        }
    }

    /// Signal every loop to exit at its next tick boundary.
    ///
    /// The loops otherwise run for the lifetime of the process; this
    /// explicit stop signal is an intentional hardening of that contract.
    pub fn stop_probing(&self) {
        info!("stopping probe scheduling");
        self.active.store(false, Ordering::Release);
    }

    /// Whether probing has been started and not stopped
    pub fn is_probing(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(super) fn spawn_probe_loop(self: &Arc<Self>, entry: Arc<ProberEntry>) {
        let aggregate = Arc::clone(&self.latency);
        let active = Arc::clone(&self.active);
        let period = entry.effective_interval(self.default_interval_secs.load(Ordering::Acquire));

        tokio::spawn(async move {
            // First tick fires after one full period: no probe-immediately
            // guarantee exists on start.
            let mut ticker =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if !active.load(Ordering::Acquire) {
                    break;
                }

                let start = Instant::now();
                *entry.probe_start_time.write() = Some(start);

                let result = entry.prober.probe().await;

                // Every attempt is timed, whether it succeeded or not
                let elapsed = start.elapsed();
                entry.latency.add_sample(elapsed);
                aggregate.add_sample(elapsed);

                if let Err(e) = result {
                    warn!(prober = %entry.name, "probe failed: {}", e);
                }
            }
        });
    }
}
