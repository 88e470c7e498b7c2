use crate::models::{AgentResult, WeatherReport};
use crate::services::{Geocoder, WeatherProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Answers "what's the weather like in X"
pub struct WeatherAgent {
    geocoder: Arc<dyn Geocoder>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherAgent {
    pub fn new(geocoder: Arc<dyn Geocoder>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Current weather for a place, as a conversational sentence
    #[instrument(skip(self))]
    pub async fn get_weather(&self, place_name: &str) -> AgentResult<WeatherReport> {
        match self.lookup(place_name).await {
            Ok(result) => result,
            Err(e) => {
                warn!("WeatherAgent error for '{}': {:#}", place_name, e);
                AgentResult::place_not_found()
            }
        }
    }

    async fn lookup(&self, place_name: &str) -> Result<AgentResult<WeatherReport>> {
        let Some(coordinates) = self.geocoder.resolve(place_name).await? else {
            return Ok(AgentResult::place_not_found());
        };
        debug!(
            "Resolved '{}' to {} ({})",
            place_name,
            coordinates.format_coordinates(),
            coordinates.display_name
        );

        let current = self
            .provider
            .current(coordinates.lat, coordinates.lon)
            .await?;

        let message = format!(
            "In {}, it's currently {} with {}.",
            place_name,
            current.format_temperature(),
            current.rain_description()
        );

        Ok(AgentResult::success(
            message,
            WeatherReport::new(place_name, &current),
        ))
    }
}
