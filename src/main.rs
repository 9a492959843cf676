//! m365-keepalive - command-line entry point.
//!
//! Reads TENANT_ID, CLIENT_ID and CLIENT_SECRET from the environment (or a
//! `.env` file) and performs one keep-alive run over the whole tenant.

#![deny(clippy::all)]

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use m365_keepalive::activity::RunSummary;
use m365_keepalive::config::{Config, Credentials};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));

    if let Err(e) = start(&config).await {
        error!("Run aborted: {:#}", e);
        std::process::exit(1);
    }
}

/// Validate credentials, then run.
async fn start(config: &Config) -> Result<RunSummary> {
    let credentials = Credentials::from_env().context("Tenant credentials are incomplete")?;

    let summary = m365_keepalive::run(config, credentials)
        .await
        .context("Keep-alive run failed")?;

    Ok(summary)
}

/// Initialize tracing/logging.
fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();
}
