use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{collections::HashSet, time::Duration};
use tracing::{debug, warn};

use crate::{
    config::UpstreamConfig,
    error::ForecastError,
    model::{
        DayDetails, DayForecast, ForecastResult, HourForecast, absolute_icon_url,
        is_checkpoint_hour,
    },
};

use super::WeatherProvider;

/// Forecast horizon requested from WeatherAPI.com.
pub const FORECAST_DAYS: u8 = 7;

/// Client for the WeatherAPI.com `forecast.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    config: UpstreamConfig,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>, config: UpstreamConfig) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ForecastError::HttpClient(e.to_string()))?;

        Ok(Self { api_key, config, http })
    }

    async fn fetch_forecast(
        &self,
        api_key: &str,
        city: &str,
    ) -> Result<WaForecastResponse, ForecastError> {
        let url = format!("{}/forecast.json", self.config.base_url.trim_end_matches('/'));
        let days = FORECAST_DAYS.to_string();

        debug!(city, days = %days, lang = %self.config.language, "requesting WeatherAPI forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", api_key),
                ("q", city),
                ("days", days.as_str()),
                ("lang", self.config.language.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            // The body is only logged; a failed read must not change the outcome.
            let body = res.text().await.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            warn!(
                city,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "WeatherAPI forecast request failed"
            );
            return Err(ForecastError::CityNotFound { status: status.as_u16() });
        }

        let body = res.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(city, error = %e, "WeatherAPI forecast JSON did not match the expected shape");
            ForecastError::UpstreamContract(e.to_string())
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn get_forecast(&self, city: &str) -> Result<ForecastResult, ForecastError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ForecastError::MissingApiKey)?;

        let parsed = self.fetch_forecast(api_key, city).await?;
        Ok(project_forecast(parsed))
    }
}

/// Reshape the provider payload into the mobile client schema.
fn project_forecast(parsed: WaForecastResponse) -> ForecastResult {
    let forecast = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(|day| {
            // First entry wins when the provider repeats a timestamp.
            let mut seen = HashSet::new();
            let hourly = day
                .hour
                .into_iter()
                .filter(|h| is_checkpoint_hour(&h.time) && seen.insert(h.time.clone()))
                .map(|h| HourForecast {
                    icon: absolute_icon_url(&h.condition.icon),
                    time: h.time,
                    temperature: h.temp_c,
                    description: h.condition.text,
                })
                .collect();

            DayForecast {
                date: day.date,
                temperature: day.day.avgtemp_c,
                description: day.day.condition.text,
                icon: absolute_icon_url(&day.day.condition.icon),
                details: DayDetails {
                    humidity: day.day.avghumidity,
                    wind_speed: day.day.maxwind_kph,
                    uv_index: day.day.uv,
                    sunrise: day.astro.sunrise,
                    sunset: day.astro.sunset,
                    hourly,
                },
            }
        })
        .collect();

    ForecastResult { city: parsed.location.name, forecast }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: String,
    sunset: String,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time: String,
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    astro: WaAstro,
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
