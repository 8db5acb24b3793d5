use crate::{Config, ForecastError, ForecastResult, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the multi-day forecast for `city` and project it into the client schema.
    async fn get_forecast(&self, city: &str) -> Result<ForecastResult, ForecastError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is not an error here: the provider refuses each request
/// instead, so the server can still start and report the fault per call.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, ForecastError> {
    let provider = WeatherApiProvider::new(
        config.api_key().map(str::to_owned),
        config.upstream.clone(),
    )?;

    Ok(Box::new(provider))
}
