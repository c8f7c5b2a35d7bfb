use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    WeatherProxyError,
    models::WeatherReport,
    report,
    weather::{ForecastSource, LocationResolver},
};

/// Collaborators shared by every request
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn LocationResolver>,
    pub forecasts: Arc<dyn ForecastSource>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn LocationResolver>, forecasts: Arc<dyn ForecastSource>) -> Self {
        Self {
            resolver,
            forecasts,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", post(get_weather))
        .with_state(state)
}

#[instrument(skip_all)]
async fn get_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> crate::Result<Json<WeatherReport>> {
    let Json(request) = payload.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => WeatherProxyError::BodyTooLarge,
        _ => WeatherProxyError::internal(rejection.body_text()),
    })?;

    let city = request.city.as_deref().map(str::trim).unwrap_or_default();
    if city.is_empty() {
        return Err(WeatherProxyError::MissingCity);
    }

    let location = state
        .resolver
        .resolve(city)
        .await
        .ok_or_else(|| WeatherProxyError::city_not_found(city))?;

    let raw = state
        .forecasts
        .fetch(location.latitude, location.longitude, None)
        .await
        .ok_or_else(|| {
            WeatherProxyError::upstream(format!(
                "no forecast for {} ({})",
                location.name,
                location.format_coordinates()
            ))
        })?;

    let report = report::assemble(&location, raw)?;

    info!(
        "Served weather for {} ({} days, {} hours)",
        location.name,
        report.daily_forecast.len(),
        report.hourly_forecast.len()
    );
    Ok(Json(report))
}
