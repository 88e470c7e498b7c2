//! Weather data models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current conditions as reported by a weather provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature, already rounded by the provider client
    pub temperature: f64,
    /// Temperature unit, e.g. "°C"
    pub unit: String,
    /// Precipitation probability in percent (0-100)
    pub precipitation_probability: u8,
    /// Local time of the reading, when the provider reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
}

impl CurrentWeather {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}{}", self.temperature, self.unit)
    }

    /// Describe the chance of rain in words
    #[must_use]
    pub fn rain_description(&self) -> String {
        match self.precipitation_probability {
            0 => "no chance of rain".to_string(),
            p @ 1..=19 => format!("a slight chance of {p}% rain"),
            p @ 20..=49 => format!("a chance of {p}% rain"),
            p => format!("a high chance of {p}% rain"),
        }
    }
}

/// Data attached to a successful weather agent result
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub place: String,
    pub temperature: f64,
    pub unit: String,
    pub precipitation_probability: u8,
    /// Local time of the reading at the place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReport {
    #[must_use]
    pub fn new(place: &str, current: &CurrentWeather) -> Self {
        Self {
            place: place.to_string(),
            temperature: current.temperature,
            unit: current.unit.clone(),
            precipitation_probability: current.precipitation_probability,
            observed_at: current.observed_at,
        }
    }
}
