//! Nominatim (OpenStreetMap) geocoding client

use super::{ensure_success, http_client, Geocoder};
use crate::config::GeocodingConfig;
use crate::models::Coordinates;
use crate::TravelGuideError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Geocoder backed by the Nominatim search API
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

/// One entry of a Nominatim search response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout(), &config.user_agent)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl SearchResult {
    fn into_coordinates(self) -> Result<Coordinates> {
        let lat = self
            .lat
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude: {}", self.lat))?;
        let lon = self
            .lon
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude: {}", self.lon))?;
        Ok(Coordinates::new(lat, lon, self.display_name))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        let place_name = place_name.trim();
        if place_name.is_empty() {
            return Err(TravelGuideError::validation("Place name is required").into());
        }

        let start_time = Instant::now();
        let url = format!(
            "{}/search?q={}&format=json&limit=1&addressdetails=1",
            self.base_url,
            urlencoding::encode(place_name)
        );
        debug!("Nominatim request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to geocode place: {place_name}"))?;
        let response = ensure_success("Nominatim", response).await?;

        let results: Vec<SearchResult> = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim search response")?;

        let Some(first) = results.into_iter().next() else {
            warn!("No geocoding results found for '{}'", place_name);
            return Ok(None);
        };

        let coordinates = first.into_coordinates()?;
        info!(
            "Geocoded '{}' to ({}) in {:.3}s",
            place_name,
            coordinates.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Some(coordinates))
    }
}
