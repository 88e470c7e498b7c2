use crate::models::AgentResult;
use crate::services::{AttractionsProvider, Geocoder};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Number of attractions listed when the caller does not ask for a count
pub const DEFAULT_PLACES_LIMIT: usize = 5;

/// Header following "In {place}, " in a places reply. The coordinator keys on
/// this exact phrase when it splices a places reply after a weather sentence.
pub const PLACES_HEADER: &str = "here are some great places you can visit:";

/// Header used when the places reply continues another sentence
pub const PLACES_CONNECTIVE: &str = "Here are some great places you can visit:";

/// Answers "what can I see in X"
pub struct PlacesAgent {
    geocoder: Arc<dyn Geocoder>,
    provider: Arc<dyn AttractionsProvider>,
}

impl PlacesAgent {
    pub fn new(geocoder: Arc<dyn Geocoder>, provider: Arc<dyn AttractionsProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Up to `limit` attractions near a place, one per paragraph
    #[instrument(skip(self))]
    pub async fn get_places(&self, place_name: &str, limit: usize) -> AgentResult<Vec<String>> {
        match self.lookup(place_name, limit).await {
            Ok(result) => result,
            Err(e) => {
                warn!("PlacesAgent error for '{}': {:#}", place_name, e);
                AgentResult::place_not_found()
            }
        }
    }

    async fn lookup(&self, place_name: &str, limit: usize) -> Result<AgentResult<Vec<String>>> {
        let Some(coordinates) = self.geocoder.resolve(place_name).await? else {
            return Ok(AgentResult::place_not_found());
        };

        let places = self
            .provider
            .nearby(coordinates.lat, coordinates.lon, limit)
            .await;
        debug!("{} attractions for '{}'", places.len(), place_name);

        if places.is_empty() {
            return Ok(AgentResult::success(
                format!(
                    "In {place_name} I couldn't find specific tourist attractions, but you can explore the area."
                ),
                Vec::new(),
            ));
        }

        let message = format!(
            "In {}, {}\n\n{}",
            place_name,
            PLACES_HEADER,
            places.join("\n\n")
        );
        Ok(AgentResult::success(message, places))
    }
}
