//! Utility modules for the vigil agent
//!
//! - **error**: error handling shared by every module
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{AgentError, Result};
