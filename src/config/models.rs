//! Configuration models

use serde::{Deserialize, Serialize};

/// Top-level agent configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Probe scheduling configuration
    #[serde(default)]
    pub probing: ProbingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AgentConfig {
    /// Apply environment variable overrides on top of the current values
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("VIGIL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_parse("VIGIL_PORT") {
            self.server.port = port;
        }
        if let Some(interval) = env_parse("VIGIL_DEFAULT_INTERVAL_SECS") {
            self.probing.default_interval_secs = interval;
        }
        if let Ok(level) = std::env::var("VIGIL_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Probe scheduling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbingConfig {
    /// Interval applied to probes registered without their own
    #[serde(default = "default_interval_secs")]
    pub default_interval_secs: u64,
    /// Metrics path for the scheduler's own instruments
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
    /// Filesystem probe settings
    #[serde(default)]
    pub filesystems: FilesystemsConfig,
}

impl Default for ProbingConfig {
    fn default() -> Self {
        Self {
            default_interval_secs: default_interval_secs(),
            metrics_path: default_metrics_path(),
            filesystems: FilesystemsConfig::default(),
        }
    }
}

/// Filesystem probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemsConfig {
    /// Whether the filesystem probe is attached at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Probing period in seconds; 0 defers to the default interval
    #[serde(default)]
    pub interval_secs: u8,
}

impl Default for FilesystemsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON-formatted log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6910
}

fn default_interval_secs() -> u64 {
    10
}

fn default_metrics_path() -> String {
    "sys/probers".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
