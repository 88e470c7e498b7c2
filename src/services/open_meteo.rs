//! Open-Meteo current weather client

use super::{ensure_success, http_client, WeatherProvider};
use crate::config::WeatherConfig;
use crate::models::CurrentWeather;
use crate::TravelGuideError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

const DEFAULT_UNIT: &str = "°C";

/// Weather provider backed by the Open-Meteo forecast API
pub struct OpenMeteoWeather {
    client: Client,
    base_url: String,
}

/// Subset of the forecast response used for current conditions
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
    current_units: Option<CurrentUnits>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    time: Option<String>,
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    precipitation_probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CurrentUnits {
    #[serde(rename = "temperature_2m")]
    temperature: Option<String>,
}

impl OpenMeteoWeather {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config.timeout(), concat!("travelguide/", env!("CARGO_PKG_VERSION")))?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ForecastResponse {
    fn into_current_weather(self) -> Result<CurrentWeather> {
        let Some(current) = self.current else {
            return Err(TravelGuideError::api("Invalid weather data received").into());
        };

        let unit = self
            .current_units
            .and_then(|units| units.temperature)
            .unwrap_or_else(|| DEFAULT_UNIT.to_string());

        let observed_at = current
            .time
            .as_deref()
            .and_then(|time| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M").ok());

        Ok(CurrentWeather {
            // adding 0.0 turns a rounded -0 into 0
            temperature: current.temperature.round() + 0.0,
            unit,
            precipitation_probability: current
                .precipitation_probability
                .map_or(0, |p| p.round().clamp(0.0, 100.0) as u8),
            observed_at,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoWeather {
    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        info!(
            "Getting current weather for coordinates: {:.4}, {:.4}",
            lat, lon
        );
        let start_time = Instant::now();

        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,precipitation_probability&timezone=auto",
            self.base_url, lat, lon
        );
        debug!("Open-Meteo request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Failed to fetch weather")?;
        let response = ensure_success("Open-Meteo", response).await?;

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse weather response: {}", e);
            anyhow::Error::from(e).context("Failed to parse Open-Meteo weather response")
        })?;
        let weather = forecast.into_current_weather()?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved current weather in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(weather)
    }
}
