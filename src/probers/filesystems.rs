//! Filesystem statistics probe
//!
//! Tracks mounted filesystems and their capacity, roughly what `df` shows.
//! Capacity gauges are mounted per filesystem the first time it is seen, so
//! filesystems mounted after startup are picked up on a later probe.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use sysinfo::Disks;

use crate::metrics::{Gauge, MetricsScope};
use crate::prober::{HtmlWriter, Prober, RegisterProber};
use crate::utils::error::Result;

/// Gauges mounted for one filesystem
struct FsInstruments {
    total: Arc<Gauge>,
    available: Arc<Gauge>,
}

/// Reading for one mounted filesystem
#[derive(Debug, Clone)]
struct FsRow {
    mount_point: String,
    device: String,
    fs_type: String,
    total_space: u64,
    available_space: u64,
    writable: bool,
}

impl FsRow {
    fn from_disk(disk: &sysinfo::Disk) -> Self {
        Self {
            mount_point: disk.mount_point().to_string_lossy().into_owned(),
            device: disk.name().to_string_lossy().into_owned(),
            fs_type: disk.file_system().to_string_lossy().into_owned(),
            total_space: disk.total_space(),
            available_space: disk.available_space(),
            writable: !disk.is_read_only(),
        }
    }
}

/// Probes mounted filesystems and their capacity.
pub struct FilesystemsProber {
    disks: Mutex<Disks>,
    scope: RwLock<Option<MetricsScope>>,
    instruments: Mutex<HashMap<String, FsInstruments>>,
    rows: RwLock<Vec<FsRow>>,
}

impl FilesystemsProber {
    /// Create a prober with the currently mounted filesystems listed
    pub fn new() -> Self {
        Self {
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            scope: RwLock::new(None),
            instruments: Mutex::new(HashMap::new()),
            rows: RwLock::new(Vec::new()),
        }
    }

    fn refresh(&self) -> Result<()> {
        let rows: Vec<FsRow> = {
            let mut disks = self.disks.lock();
            disks.refresh_list();
            disks.list().iter().map(FsRow::from_disk).collect()
        };

        if let Some(scope) = self.scope.read().clone() {
            let mut instruments = self.instruments.lock();
            for row in &rows {
                if !instruments.contains_key(&row.mount_point) {
                    let dir = scope.subscope(&metric_dir_name(&row.mount_point));
                    let entry = FsInstruments {
                        total: dir.new_gauge("total-bytes")?,
                        available: dir.new_gauge("available-bytes")?,
                    };
                    instruments.insert(row.mount_point.clone(), entry);
                }
                if let Some(entry) = instruments.get(&row.mount_point) {
                    entry.total.set(row.total_space);
                    entry.available.set(row.available_space);
                }
            }
        }

        *self.rows.write() = rows;
        Ok(())
    }
}

impl Default for FilesystemsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for FilesystemsProber {
    async fn probe(&self) -> Result<()> {
        self.refresh()
    }

    fn as_register_prober(&self) -> Option<&dyn RegisterProber> {
        Some(self)
    }

    fn as_html_writer(&self) -> Option<&dyn HtmlWriter> {
        Some(self)
    }
}

impl RegisterProber for FilesystemsProber {
    fn register(&self, scope: &MetricsScope) -> Result<()> {
        *self.scope.write() = Some(scope.clone());
        Ok(())
    }
}

impl HtmlWriter for FilesystemsProber {
    fn write_html(&self, writer: &mut String) {
        let rows = self.rows.read();
        let _ = writeln!(writer, "<h2>Filesystems</h2>");
        if rows.is_empty() {
            let _ = writeln!(writer, "<p>No filesystems probed yet</p>");
            return;
        }
        let _ = writeln!(writer, "<table border=\"1\">");
        let _ = writeln!(
            writer,
            "<tr><th>Mount point</th><th>Device</th><th>Type</th>\
             <th>Size</th><th>Available</th><th>Writable</th></tr>"
        );
        for row in rows.iter() {
            let _ = writeln!(
                writer,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.mount_point,
                row.device,
                row.fs_type,
                format_bytes(row.total_space),
                format_bytes(row.available_space),
                if row.writable { "yes" } else { "no" },
            );
        }
        let _ = writeln!(writer, "</table>");
    }
}

/// Directory name for a mount point's instruments
fn metric_dir_name(mount_point: &str) -> String {
    let trimmed = mount_point.trim_matches('/');
    if trimmed.is_empty() {
        "root".to_string()
    } else {
        trimmed.replace('/', "-")
    }
}

/// Human-readable byte count
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;

    #[test]
    fn test_metric_dir_name() {
        assert_eq!(metric_dir_name("/"), "root");
        assert_eq!(metric_dir_name("/var/log"), "var-log");
        assert_eq!(metric_dir_name("/home"), "home");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }

    #[tokio::test]
    async fn test_probe_and_render() {
        let registry = MetricsRegistry::new();
        let prober = FilesystemsProber::new();

        prober
            .register(&registry.scope("probers/filesystems"))
            .unwrap();
        prober.probe().await.unwrap();

        let mut body = String::new();
        prober.write_html(&mut body);
        assert!(body.contains("<h2>Filesystems</h2>"));
    }

    #[test]
    fn test_render_before_first_probe() {
        let prober = FilesystemsProber::new();
        let mut body = String::new();
        prober.write_html(&mut body);
        assert!(body.contains("No filesystems probed yet"));
    }
}
