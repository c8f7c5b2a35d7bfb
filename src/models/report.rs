//! Response records returned to the browser

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful `POST /api/weather`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily_forecast: Vec<DailyForecastEntry>,
    pub hourly_forecast: Vec<HourlyForecastEntry>,
}

/// Conditions right now at the resolved location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub admin1: String,
    /// Temperature in Celsius, rounded
    pub temperature: i64,
    /// Felt temperature in Celsius, rounded
    pub apparent_temperature: i64,
    /// Relative humidity in percent, as reported upstream
    pub humidity: Value,
    /// Wind speed in km/h, rounded
    pub wind_speed: i64,
    /// Wind direction in degrees, as reported upstream
    pub wind_direction: Value,
    pub description: String,
    #[serde(rename = "emoji")]
    pub symbol: String,
    /// Upstream observation time, local to the location
    pub timestamp: String,
}

/// One day of the daily outlook
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecastEntry {
    pub date: String,
    pub max_temp: i64,
    pub min_temp: i64,
    /// Precipitation sum in mm, one decimal
    pub precipitation: f64,
    pub precipitation_probability: Value,
    pub description: String,
    #[serde(rename = "emoji")]
    pub symbol: String,
}

/// One hour of the hourly outlook
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyForecastEntry {
    pub time: String,
    pub temperature: i64,
    pub precipitation_probability: Value,
    pub description: String,
    #[serde(rename = "emoji")]
    pub symbol: String,
}
