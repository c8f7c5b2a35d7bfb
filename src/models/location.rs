//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// Resolved place, produced once per request by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name as returned by the geocoder
    pub name: String,
    /// Country name, empty when the geocoder has none
    pub country: String,
    /// First-level administrative region (state, province), empty when absent
    pub admin1: String,
}

impl Location {
    /// Create a new location without country or region
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: String::new(),
            admin1: String::new(),
        }
    }

    /// Attach country and region names
    #[must_use]
    pub fn with_region(mut self, country: String, admin1: String) -> Self {
        self.country = country;
        self.admin1 = admin1;
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
