//! vigil agent binary
//!
//! Loads configuration, wires the probe registry and serves the status API.

use clap::Parser;
use std::process::ExitCode;

use vigil_rs::config::Config;
use vigil_rs::utils::logging;
use vigil_rs::Agent;

/// Health probing agent
#[derive(Debug, Parser)]
#[command(name = "agent", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, env = "VIGIL_CONFIG", default_value = "config/agent.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Fall back to env-seeded defaults when no config file is present
    let config = match Config::from_file(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Could not load {} ({}); falling back to defaults",
                args.config, e
            );
            match Config::from_env() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    logging::init_logging(config.logging());

    let agent = match Agent::new(config) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match agent.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
