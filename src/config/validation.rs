//! Configuration validation

use super::models::{LoggingConfig, ProbingConfig, ServerConfig};

/// Validation for configuration sections
pub trait Validate {
    /// Check the section for values that cannot work at runtime
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ProbingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_interval_secs == 0 {
            return Err("default_interval_secs must be greater than 0".to_string());
        }
        if self.metrics_path.trim_matches('/').is_empty() {
            return Err("metrics_path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.is_empty() {
            return Err("level must not be empty".to_string());
        }
        Ok(())
    }
}
