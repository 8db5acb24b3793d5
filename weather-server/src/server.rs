//! HTTP surface of the gateway: `POST /forecast` plus CORS for the mobile client.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use weather_core::{ForecastError, ForecastRequest, ForecastResult, WeatherProvider};

#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/forecast", post(get_forecast))
        .layer(cors)
        .with_state(state)
}

/// POST /forecast — fetch the forecast for `{"city": ...}`.
async fn get_forecast(
    State(state): State<AppState>,
    Json(request): Json<ForecastRequest>,
) -> Result<Json<ForecastResult>, ApiError> {
    let city = request.validated_city()?;
    info!(city, "forecast requested");

    let result = state.provider.get_forecast(city).await?;

    info!(city, days = result.forecast.len(), "forecast served");
    Ok(Json(result))
}

/// Maps [`ForecastError`] onto a status code and a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError(ForecastError);

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "forecast request rejected");
        } else {
            error!(status = status.as_u16(), error = %self.0, "forecast request failed");
        }

        (status, Json(json!({ "detail": self.0.client_message() }))).into_response()
    }
}

/// Bind and serve until Ctrl-C.
pub async fn serve(bind_address: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((bind_address, port))
        .await
        .with_context(|| format!("Failed to bind {bind_address}:{port}"))?;

    info!("forecast gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down forecast gateway");
}
