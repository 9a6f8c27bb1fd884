//! CESE backend server
//!
//! Loads configuration, installs logging and serves the HTTP API.

#![allow(missing_docs)]

use anyhow::Context;
use cese_backend::config::{Config, DEFAULT_CONFIG_PATH};
use cese_backend::server::builder::run_server;
use cese_backend::utils::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "cese-server", version, about = "CESE backend service")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CESE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env may carry CESE_CONFIG, so load it before parsing flags
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_file(&cli.config)
        .await
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    init_logging(&config.log).context("failed to initialise logging")?;
    info!("Loaded configuration from {}", cli.config.display());
    for warning in config.jwt.insecure_warnings() {
        warn!("{}", warning);
    }

    run_server(config).await?;
    Ok(())
}
