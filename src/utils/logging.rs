//! Logging initialisation
//!
//! Sets up the global tracing subscriber from the logging configuration.
//! `RUST_LOG` takes precedence over the configured level when set.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialise the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already initialised: {}", e);
    }
}
