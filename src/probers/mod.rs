//! Built-in probe implementations
//!
//! Probes shipped with the agent. Each one satisfies the probe contract in
//! [`crate::prober`] and advertises whichever optional capabilities it
//! supports.

pub mod filesystems;

pub use filesystems::FilesystemsProber;
