//! # vigil-rs
//!
//! A lightweight health probing agent written in Rust. Pluggable probes run
//! on independent timers, per-probe latency lands in an in-process metrics
//! sink, and a live status page aggregates every probe's self-description.
//!
//! ## Features
//!
//! - **Pluggable Probes**: any object satisfying the probe contract can be
//!   attached, pre-built or via a factory
//! - **Independent Cadence**: one scheduling loop per probe, so one slow
//!   probe never delays another's schedule
//! - **Latency Metrics**: per-probe and aggregate cumulative distributions,
//!   recorded for every attempt whether it succeeded or failed
//! - **Live Status Page**: probes contribute HTML snippets, plain or
//!   request-aware, rendered in attachment order
//! - **Built on Tokio**: probe loops are lightweight async tasks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vigil_rs::{Agent, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/agent.yaml").await?;
//!     let agent = Agent::new(config)?;
//!     agent.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Attaching Your Own Probe
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use std::sync::Arc;
//! use vigil_rs::{Agent, Config, Prober, Result};
//!
//! struct PingProber;
//!
//! #[async_trait]
//! impl Prober for PingProber {
//!     async fn probe(&self) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let agent = Agent::new(Config::from_env()?)?;
//!     let probe: Arc<dyn Prober> = Arc::new(PingProber);
//!     agent.probers().add(Some(probe), "probers/ping", 30)?;
//!     agent.run().await
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod metrics;
pub mod prober;
pub mod probers;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use prober::{HtmlWriter, Prober, ProberList, RegisterProber, RequestHtmlWriter};
pub use utils::error::{AgentError, Result};

use std::sync::Arc;
use tracing::info;

use crate::metrics::MetricsRegistry;
use crate::probers::FilesystemsProber;
use crate::server::AppState;

/// A minimal probing agent: registry, built-in probes and HTTP surface.
pub struct Agent {
    config: Arc<Config>,
    metrics: Arc<MetricsRegistry>,
    probers: Arc<ProberList>,
}

impl Agent {
    /// Wire the registry and built-in probes from `config`.
    ///
    /// Wiring errors (duplicate metrics paths, failed probe registration)
    /// are fatal and propagate to the caller.
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new agent instance");

        let metrics = MetricsRegistry::new();
        let probers = ProberList::new(Arc::clone(&metrics), &config.probing().metrics_path)?;

        // Built-in probes; a disabled probe attaches as None
        let fs_config = &config.probing().filesystems;
        let filesystems: Option<Arc<dyn Prober>> = fs_config
            .enabled
            .then(|| Arc::new(FilesystemsProber::new()) as _);
        probers.add(filesystems, "probers/filesystems", fs_config.interval_secs)?;

        Ok(Self {
            config: Arc::new(config),
            metrics,
            probers,
        })
    }

    /// The probe registry, e.g. to attach additional probes before `run`.
    pub fn probers(&self) -> &Arc<ProberList> {
        &self.probers
    }

    /// The metrics sink backing the registry.
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Start probing and serve the HTTP API until shutdown.
    pub async fn run(self) -> Result<()> {
        info!("Starting vigil agent");

        self.probers
            .start_probing(self.config.probing().default_interval_secs);

        let state = AppState::new(
            Arc::clone(&self.config),
            Arc::clone(&self.probers),
            Arc::clone(&self.metrics),
        );
        server::serve(state).await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Agent build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information for the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert!(!info.version.is_empty());
        assert_eq!(info.version, VERSION);
    }

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, env!("CARGO_PKG_NAME"));
        assert_eq!(DESCRIPTION, env!("CARGO_PKG_DESCRIPTION"));
    }

    #[test]
    fn test_agent_wiring() {
        let agent = Agent::new(Config::default()).unwrap();
        // The filesystem probe is attached by default
        assert_eq!(agent.probers().len(), 1);
        assert!(agent.metrics().contains_path("probers/filesystems"));
    }

    #[test]
    fn test_agent_wiring_with_filesystems_disabled() {
        let mut config = Config::default();
        config.agent.probing.filesystems.enabled = false;

        let agent = Agent::new(config).unwrap();
        assert!(agent.probers().is_empty());
        assert!(!agent.metrics().contains_path("probers/filesystems"));
    }
}
