//! `CityCast` - city weather lookup service
//!
//! This library resolves a city name through Open-Meteo geocoding, fetches
//! the forecast for its coordinates and reshapes both into a compact report
//! for the browser page.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use error::WeatherProxyError;
pub use models::{Location, WeatherReport};
pub use weather::{ForecastSource, LocationResolver, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherProxyError>;
