use thiserror::Error;

/// Everything that can go wrong while serving a forecast.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("City must not be empty")]
    EmptyCity,

    #[error("No WeatherAPI.com API key configured")]
    MissingApiKey,

    /// WeatherAPI.com answered with a non-success status. Unknown cities,
    /// outages and exhausted quotas all land here.
    #[error("WeatherAPI request failed with status {status}")]
    CityNotFound { status: u16 },

    #[error("Unexpected WeatherAPI response: {0}")]
    UpstreamContract(String),

    #[error("Failed to reach WeatherAPI.com: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ForecastError {
    /// HTTP status the gateway answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyCity | Self::CityNotFound { .. } => 400,
            Self::MissingApiKey | Self::HttpClient(_) => 500,
            Self::UpstreamContract(_) | Self::Upstream(_) => 502,
        }
    }

    /// Message shown to the mobile client.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::EmptyCity => "City must not be empty",
            Self::MissingApiKey => "API key not found",
            Self::CityNotFound { .. } => "City not found",
            Self::UpstreamContract(_) => "Unexpected response from weather provider",
            Self::Upstream(_) => "Weather provider is unavailable",
            Self::HttpClient(_) => "Internal server error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
