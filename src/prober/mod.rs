//! Probe scheduling and registry
//!
//! The control plane of the agent: a registry that owns the set of attached
//! probes, runs one periodic execution loop per probe, records per-probe and
//! aggregate latency into the metrics sink, and fans HTML rendering out
//! across all probes in registration order.

mod html;
mod list;
mod tasks;
mod types;


pub use list::{ProbeStatus, ProberList};
pub use types::{HtmlWriter, Prober, ProberEntry, RegisterProber, RequestHtmlWriter};
