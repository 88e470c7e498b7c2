//! External data providers
//!
//! The agents only see these traits; the HTTP clients below are the production
//! implementations and tests substitute deterministic fakes.

use crate::models::{Coordinates, CurrentWeather};
use crate::TravelGuideError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

pub mod nominatim;
pub mod open_meteo;
pub mod overpass;

pub use nominatim::NominatimGeocoder;
pub use open_meteo::OpenMeteoWeather;
pub use overpass::OverpassAttractions;

/// Resolves a place name to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the provider knows no such place, `Err` on transport or parse failures
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>>;
}

/// Reads current weather conditions at a point
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather>;
}

/// Lists named attractions around a point
#[async_trait]
pub trait AttractionsProvider: Send + Sync {
    /// Ordered, unique names. Never fails: backend problems yield an empty list.
    async fn nearby(&self, lat: f64, lon: f64, limit: usize) -> Vec<String>;
}

/// Build the HTTP client shared by one provider
pub(crate) fn http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Turn non-success statuses into API errors
pub(crate) async fn ensure_success(provider: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match status.as_u16() {
        429 => format!("{provider} rate limit exceeded"),
        _ => format!(
            "{provider} request failed with status {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        ),
    };
    Err(TravelGuideError::api_status(message, status.as_u16()).into())
}
