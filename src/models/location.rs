//! Location model for resolved place coordinates

use serde::{Deserialize, Serialize};

/// Coordinates resolved for a place name by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Full name reported by the geocoder
    pub display_name: String,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64, display_name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            display_name: display_name.into(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}
