//! Configuration management for the agent
//!
//! This module handles loading, validation, and management of all agent
//! configuration.

pub mod models;
pub mod validation;

#[cfg(test)]
mod tests;

pub use models::*;
pub use validation::Validate;

use std::path::Path;
use tracing::{debug, info};

use crate::utils::error::{AgentError, Result};

/// Main configuration struct for the agent
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Agent configuration
    pub agent: AgentConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AgentError::Config(format!("Failed to read config file: {}", e)))?;

        let agent: AgentConfig = serde_yaml::from_str(&content)
            .map_err(|e| AgentError::Config(format!("Failed to parse config: {}", e)))?;

        let mut config = Self { agent };
        config.agent.apply_env();

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables over built-in defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut agent = AgentConfig::default();
        agent.apply_env();

        let config = Self { agent };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.agent.server
    }

    /// Get probing configuration
    pub fn probing(&self) -> &ProbingConfig {
        &self.agent.probing
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.agent.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.agent
            .server
            .validate()
            .map_err(|e| AgentError::Config(format!("Server config error: {}", e)))?;

        self.agent
            .probing
            .validate()
            .map_err(|e| AgentError::Config(format!("Probing config error: {}", e)))?;

        self.agent
            .logging
            .validate()
            .map_err(|e| AgentError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}
