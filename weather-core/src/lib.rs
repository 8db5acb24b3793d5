//! Core library for the forecast gateway.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com forecast client and its projection into the mobile schema
//! - Shared domain models and the error taxonomy
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::ForecastError;
pub use model::{DayDetails, DayForecast, ForecastRequest, ForecastResult, HourForecast};
pub use provider::{WeatherProvider, provider_from_config};
