//! Error handling for the agent
//!
//! This module defines the error type used throughout the agent.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use thiserror::Error;

/// Result type alias for the agent
pub type Result<T> = std::result::Result<T, AgentError>;

/// Main error type for the agent
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metrics registration errors (duplicate instrument paths, bad names)
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Probe execution errors
    #[error("Probe error: {0}")]
    Probe(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl actix_web::ResponseError for AgentError {
    fn status_code(&self) -> StatusCode {
        match self {
            AgentError::Config(_) | AgentError::Yaml(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_error_display() {
        let err = AgentError::Config("missing port".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing port");

        let err = AgentError::Metrics("duplicate path".to_string());
        assert_eq!(err.to_string(), "Metrics error: duplicate path");
    }

    #[test]
    fn test_error_status_codes() {
        let config_err = AgentError::Config("bad".to_string());
        assert_eq!(config_err.status_code(), StatusCode::BAD_REQUEST);

        let internal_err = AgentError::Internal("boom".to_string());
        assert_eq!(internal_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AgentError = io_err.into();
        assert!(matches!(err, AgentError::Io(_)));
    }
}
