//! Data models for the `CityCast` service
//!
//! - Location: geocoded place and its naming metadata
//! - Report: flattened records sent back to the browser

pub mod location;
pub mod report;

// Re-export all public types for convenient access
pub use location::Location;
pub use report::{CurrentConditions, DailyForecastEntry, HourlyForecastEntry, WeatherReport};
