//! Configuration tests

#![cfg(test)]

use std::io::Write as _;

use super::{Config, Validate};
use super::models::{ProbingConfig, ServerConfig};

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server().host, "127.0.0.1");
    assert_eq!(config.server().port, 6910);
    assert_eq!(config.probing().default_interval_secs, 10);
    assert_eq!(config.probing().metrics_path, "sys/probers");
    assert!(config.probing().filesystems.enabled);
    assert_eq!(config.probing().filesystems.interval_secs, 0);
    assert_eq!(config.logging().level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_server_validation() {
    let valid = ServerConfig {
        host: "0.0.0.0".to_string(),
        port: 8080,
    };
    assert!(valid.validate().is_ok());

    let bad_port = ServerConfig {
        host: "0.0.0.0".to_string(),
        port: 0,
    };
    assert!(bad_port.validate().is_err());

    let bad_host = ServerConfig {
        host: String::new(),
        port: 8080,
    };
    assert!(bad_host.validate().is_err());
}

#[test]
fn test_probing_validation() {
    let mut probing = ProbingConfig::default();
    assert!(probing.validate().is_ok());

    probing.default_interval_secs = 0;
    assert!(probing.validate().is_err());

    probing.default_interval_secs = 5;
    probing.metrics_path = "//".to_string();
    assert!(probing.validate().is_err());
}

#[tokio::test]
async fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "server:\n  host: 0.0.0.0\n  port: 7001\nprobing:\n  default_interval_secs: 30\n  filesystems:\n    enabled: false\n    interval_secs: 15\n"
    )
    .unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.server().host, "0.0.0.0");
    assert_eq!(config.server().port, 7001);
    assert_eq!(config.probing().default_interval_secs, 30);
    assert!(!config.probing().filesystems.enabled);
    assert_eq!(config.probing().filesystems.interval_secs, 15);
    // Unspecified sections fall back to defaults
    assert_eq!(config.probing().metrics_path, "sys/probers");
    assert_eq!(config.logging().level, "info");
}

#[tokio::test]
async fn test_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "probing:\n  default_interval_secs: 0\n").unwrap();

    let err = Config::from_file(file.path()).await;
    assert!(err.is_err());
}

#[tokio::test]
async fn test_from_file_missing() {
    let err = Config::from_file("/nonexistent/agent.yaml").await;
    assert!(err.is_err());
}
