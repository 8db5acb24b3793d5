use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Local times of day kept from the upstream hourly breakdown.
pub const CHECKPOINT_HOURS: [&str; 4] = ["00:00", "06:00", "12:00", "18:00"];

/// Inbound body of `POST /forecast`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    pub city: String,
}

impl ForecastRequest {
    /// The city with surrounding whitespace removed; empty input is rejected.
    pub fn validated_city(&self) -> Result<&str, ForecastError> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(ForecastError::EmptyCity);
        }
        Ok(city)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub city: String,
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// `YYYY-MM-DD`, as reported by the provider.
    pub date: String,
    /// Average temperature, °C.
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub details: DayDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDetails {
    /// Average humidity, %.
    pub humidity: f64,
    /// Maximum wind speed, kph.
    pub wind_speed: f64,
    pub uv_index: f64,
    pub sunrise: String,
    pub sunset: String,
    pub hourly: Vec<HourForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    pub time: String,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Whether an upstream timestamp such as `2024-05-01 06:00` falls on a checkpoint hour.
pub fn is_checkpoint_hour(time: &str) -> bool {
    CHECKPOINT_HOURS.iter().any(|hour| time.ends_with(hour))
}

/// WeatherAPI.com hands out protocol-relative icon URLs (`//cdn.weatherapi.com/...`).
pub fn absolute_icon_url(icon: &str) -> String {
    if icon.starts_with("https:") || icon.starts_with("http:") {
        icon.to_string()
    } else {
        format!("https:{icon}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_hours_match_on_suffix() {
        assert!(is_checkpoint_hour("2024-05-01 00:00"));
        assert!(is_checkpoint_hour("2024-05-01 06:00"));
        assert!(is_checkpoint_hour("2024-05-01 12:00"));
        assert!(is_checkpoint_hour("2024-05-01 18:00"));

        assert!(!is_checkpoint_hour("2024-05-01 03:00"));
        assert!(!is_checkpoint_hour("2024-05-01 10:00"));
        assert!(!is_checkpoint_hour("2024-05-01 20:00"));
        assert!(!is_checkpoint_hour("2024-05-01 06:30"));
    }

    #[test]
    fn icon_url_gets_https_scheme() {
        assert_eq!(
            absolute_icon_url("//cdn.weatherapi.com/weather/64x64/day/113.png"),
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }

    #[test]
    fn icon_url_with_scheme_is_left_alone() {
        let url = "https://cdn.weatherapi.com/weather/64x64/night/116.png";
        assert_eq!(absolute_icon_url(url), url);
    }

    #[test]
    fn validated_city_trims_and_rejects_blank() {
        let req = ForecastRequest { city: "  London ".into() };
        assert_eq!(req.validated_city().unwrap(), "London");

        let req = ForecastRequest { city: "   ".into() };
        assert!(matches!(req.validated_city(), Err(ForecastError::EmptyCity)));
    }

    #[test]
    fn result_serializes_with_client_field_names() {
        let result = ForecastResult {
            city: "London".into(),
            forecast: vec![DayForecast {
                date: "2024-05-01".into(),
                temperature: 12.5,
                description: "Sunny".into(),
                icon: "https://cdn.weatherapi.com/113.png".into(),
                details: DayDetails {
                    humidity: 70.0,
                    wind_speed: 14.4,
                    uv_index: 4.0,
                    sunrise: "05:32 AM".into(),
                    sunset: "08:24 PM".into(),
                    hourly: vec![],
                },
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        let details = &json["forecast"][0]["details"];
        assert_eq!(json["city"], "London");
        assert_eq!(details["wind_speed"], 14.4);
        assert_eq!(details["uv_index"], 4.0);
        assert!(details["hourly"].as_array().unwrap().is_empty());
    }
}
