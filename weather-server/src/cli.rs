use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use tracing::warn;
use weather_core::{Config, ForecastRequest, provider_from_config};

use crate::server::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Forecast gateway for the mobile weather app")]
pub struct Cli {
    /// Path to the config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `POST /forecast` over HTTP.
    Serve {
        /// Address to bind, e.g. "127.0.0.1".
        #[arg(long)]
        bind: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch a forecast once and print it as JSON.
    Forecast {
        /// City name, e.g. "London".
        city: String,
    },

    /// Store the WeatherAPI.com API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind, port } => {
                let mut config = load_config(self.config.as_ref())?.with_env_overrides();
                if let Some(bind) = bind {
                    config.server.bind_address = bind;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }

                if config.api_key().is_none() {
                    warn!(
                        "No API key configured; every forecast request will fail. \
                         Set WEATHERAPI_KEY or run `weather-server configure`."
                    );
                }

                let provider = provider_from_config(&config)?;
                let state = AppState { provider: Arc::from(provider) };
                server::serve(&config.server.bind_address, config.server.port, state).await
            }
            Command::Forecast { city } => {
                let request = ForecastRequest { city };
                let city = request.validated_city()?;

                let config = load_config(self.config.as_ref())?.with_env_overrides();
                let provider = provider_from_config(&config)?;

                let result = provider
                    .get_forecast(city)
                    .await
                    .with_context(|| format!("Failed to get forecast for '{city}'"))?;

                println!("{}", serde_json::to_string_pretty(&result)?);
                Ok(())
            }
            Command::Configure => {
                // Env overrides are not applied: only file settings are written back.
                let mut config = load_config(self.config.as_ref())?;

                let api_key = Password::new("WeatherAPI.com API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.set_api_key(api_key.trim().to_string());

                let path = match &self.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };

                println!("Saved API key to {}", path.display());
                Ok(())
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
