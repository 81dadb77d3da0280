//! Metrics sink tests

#![cfg(test)]

use std::time::Duration;

use super::MetricsRegistry;

#[test]
fn test_distribution_records_samples() {
    let registry = MetricsRegistry::new();
    let scope = registry.scope("probers/test");
    let dist = scope.new_latency_distribution("probe-duration").unwrap();

    dist.add_sample(Duration::from_millis(10));
    dist.add_sample(Duration::from_millis(20));

    let snapshot = dist.snapshot();
    assert_eq!(snapshot.count, 2);
    assert!((snapshot.average_ms - 15.0).abs() < 1e-9);
    assert!((snapshot.min_ms - 10.0).abs() < 1e-9);
    assert!((snapshot.max_ms - 20.0).abs() < 1e-9);
    assert!((snapshot.p50_ms - 15.0).abs() < 1e-9);
    assert!((snapshot.p95_ms - 19.5).abs() < 1e-9);
    assert_eq!(snapshot.name, "probers/test/probe-duration");
}

#[test]
fn test_empty_distribution_snapshot() {
    let registry = MetricsRegistry::new();
    let dist = registry
        .scope("probers/idle")
        .new_latency_distribution("probe-duration")
        .unwrap();

    let snapshot = dist.snapshot();
    assert_eq!(snapshot.count, 0);
    assert_eq!(snapshot.average_ms, 0.0);
    assert_eq!(snapshot.p99_ms, 0.0);
}

#[test]
fn test_duplicate_mount_is_an_error() {
    let registry = MetricsRegistry::new();
    let scope = registry.scope("probers/dup");

    scope.new_latency_distribution("probe-duration").unwrap();
    let err = scope.new_latency_distribution("probe-duration");
    assert!(err.is_err());

    // A gauge at the same path collides too
    let err = scope.new_gauge("probe-duration");
    assert!(err.is_err());
}

#[test]
fn test_scope_paths_are_normalized() {
    let registry = MetricsRegistry::new();
    let scope = registry.scope("/probers/fs/");
    assert_eq!(scope.path(), "probers/fs");

    let child = scope.subscope("/root/");
    assert_eq!(child.path(), "probers/fs/root");

    let gauge = child.new_gauge("free-bytes").unwrap();
    assert_eq!(gauge.name(), "probers/fs/root/free-bytes");
}

#[test]
fn test_contains_path() {
    let registry = MetricsRegistry::new();
    assert!(!registry.contains_path("probers/fs"));

    registry
        .scope("probers/fs")
        .new_gauge("free-bytes")
        .unwrap();

    assert!(registry.contains_path("probers/fs"));
    assert!(registry.contains_path("probers/fs/free-bytes"));
    assert!(!registry.contains_path("probers/other"));
    // Prefix matching is per path segment, not per character
    assert!(!registry.contains_path("probers/f"));
}

#[test]
fn test_gauge_set_and_get() {
    let registry = MetricsRegistry::new();
    let gauge = registry.scope("sys").new_gauge("connections").unwrap();

    assert_eq!(gauge.get(), 0);
    gauge.set(42);
    assert_eq!(gauge.get(), 42);
}

#[test]
fn test_render_text() {
    let registry = MetricsRegistry::new();
    let scope = registry.scope("probers/a");
    let dist = scope.new_latency_distribution("probe-duration").unwrap();
    let gauge = registry.scope("sys").new_gauge("uptime").unwrap();

    dist.add_sample(Duration::from_millis(5));
    gauge.set(7);

    let text = registry.render_text();
    assert!(text.contains("probers/a/probe-duration/count 1"));
    assert!(text.contains("sys/uptime 7"));
}
