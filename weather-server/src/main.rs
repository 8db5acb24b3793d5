//! Binary crate for the `weather-server` forecast gateway.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving `POST /forecast` to the mobile client
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` never overrides variables already set in the environment.
    let dotenv = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = dotenv {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let cmd = cli::Cli::parse();
    cmd.run().await
}
