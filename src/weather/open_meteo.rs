//! `OpenMeteo` geocoding and forecast client
//!
//! Both endpoints are free and need no API key. Failures are logged and folded
//! into `None` at the trait boundary so callers only see "found" or "not found".

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ForecastSource, LocationResolver};
use crate::config::UpstreamConfig;
use crate::models::Location;

const USER_AGENT: &str = concat!("CityCast/", env!("CARGO_PKG_VERSION"));

/// Instantaneous metrics requested for `current`
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,wind_direction_10m";
/// Per-hour metrics requested for `hourly`
pub const HOURLY_FIELDS: &str = "temperature_2m,weather_code,precipitation_probability";
/// Per-day metrics requested for `daily`
pub const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max";

/// HTTP client for the `OpenMeteo` geocoding and forecast APIs
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
    default_timezone: String,
}

impl OpenMeteoClient {
    /// Create a new client; every request is bounded by `timeout_seconds`
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
            default_timezone: config.timezone.clone(),
        })
    }

    /// Look up the single best match for `name`
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Option<Location>> {
        let url = format!(
            "{}?name={}&count=1&language={}&format=json",
            self.geocoding_url,
            urlencoding::encode(name),
            urlencoding::encode(&self.language)
        );
        debug!("OpenMeteo geocoding request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Geocoding request failed")?
            .error_for_status()
            .with_context(|| "Geocoding service returned an error status")?;

        let body: GeocodingResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Location::from))
    }

    /// Fetch current, hourly and daily data as the raw JSON document
    #[instrument(skip(self))]
    pub async fn forecast(&self, latitude: f64, longitude: f64, timezone: &str) -> Result<Value> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone={}&language={}",
            self.forecast_url,
            latitude,
            longitude,
            CURRENT_FIELDS,
            HOURLY_FIELDS,
            DAILY_FIELDS,
            urlencoding::encode(timezone),
            urlencoding::encode(&self.language)
        );
        debug!("OpenMeteo forecast request URL: {}", url);

        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Forecast request failed")?
            .error_for_status()
            .with_context(|| "Forecast service returned an error status")?;

        let payload: Value = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        debug!(
            "Retrieved forecast in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(payload)
    }
}

#[async_trait]
impl LocationResolver for OpenMeteoClient {
    async fn resolve(&self, name: &str) -> Option<Location> {
        match self.geocode(name).await {
            Ok(Some(location)) => {
                debug!(
                    "Found location: {} ({})",
                    location.name,
                    location.format_coordinates()
                );
                Some(location)
            }
            Ok(None) => {
                debug!("No geocoding results for '{}'", name);
                None
            }
            Err(e) => {
                warn!("Geocoding '{}' failed: {:#}", name, e);
                None
            }
        }
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn fetch(&self, latitude: f64, longitude: f64, timezone: Option<&str>) -> Option<Value> {
        let timezone = timezone.unwrap_or(&self.default_timezone);
        match self.forecast(latitude, longitude, timezone).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(
                    "Forecast for ({:.4}, {:.4}) failed: {:#}",
                    latitude, longitude, e
                );
                None
            }
        }
    }
}

/// Geocoding response from `OpenMeteo`; `results` is omitted when nothing matched
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location::new(result.latitude, result.longitude, result.name).with_region(
            result.country.unwrap_or_default(),
            result.admin1.unwrap_or_default(),
        )
    }
}

/// Forecast document as requested with [`CURRENT_FIELDS`], [`HOURLY_FIELDS`] and [`DAILY_FIELDS`]
#[derive(Debug, Deserialize)]
pub struct ForecastPayload {
    pub current: CurrentData,
    pub hourly: HourlyData,
    pub daily: DailyData,
}

/// Current conditions block
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Value,
    pub weather_code: Option<i64>,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction: Value,
}

/// Hourly block, parallel arrays indexed like `time`
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    pub weather_code: Vec<Option<i64>>,
    pub precipitation_probability: Vec<Value>,
}

/// Daily block, parallel arrays indexed like `time`
#[derive(Debug, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    pub weather_code: Vec<Option<i64>>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub precipitation_probability_max: Vec<Value>,
}
