use async_trait::async_trait;
use serde_json::Value;

use crate::models::Location;

pub mod codes;
pub mod open_meteo;

pub use codes::{WeatherCode, interpret, interpret_optional};
pub use open_meteo::OpenMeteoClient;

/// Turns a free-text place name into coordinates.
///
/// Implementations swallow their own failures: transport errors, bad statuses
/// and empty result sets all come back as `None`.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Option<Location>;
}

/// Fetches the raw forecast payload for a coordinate pair.
///
/// `None` means the forecast service could not be reached or answered with an
/// error. A `timezone` of `None` lets the service infer it from the coordinates.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64, timezone: Option<&str>) -> Option<Value>;
}
