//! Query orchestration
//!
//! The coordinator parses a query once, starts only the agents the intent
//! asks for, waits for every one of them, and merges their messages into a
//! single reply. Any agent that cannot resolve the place fails the whole
//! query with the place-not-found message.

use crate::agents::{PlacesAgent, WeatherAgent, DEFAULT_PLACES_LIMIT, PLACES_CONNECTIVE, PLACES_HEADER};
use crate::config::TravelGuideConfig;
use crate::models::{AgentResult, FinalResponse, WeatherReport};
use crate::parser::TextParser;
use crate::services::{
    AttractionsProvider, Geocoder, NominatimGeocoder, OpenMeteoWeather, OverpassAttractions,
    WeatherProvider,
};
use anyhow::{Context, Result};
use futures::future;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Captures the attraction list following a places header
static PLACES_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)In .+?, {}\n\n(.+)",
        regex::escape(PLACES_HEADER)
    ))
    .expect("places header pattern is valid")
});

pub struct Coordinator {
    weather: Arc<WeatherAgent>,
    places: Arc<PlacesAgent>,
    places_limit: usize,
}

impl Coordinator {
    /// Wire both agents to the given collaborators. The geocoder is shared.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather_provider: Arc<dyn WeatherProvider>,
        attractions: Arc<dyn AttractionsProvider>,
    ) -> Self {
        Self {
            weather: Arc::new(WeatherAgent::new(geocoder.clone(), weather_provider)),
            places: Arc::new(PlacesAgent::new(geocoder, attractions)),
            places_limit: DEFAULT_PLACES_LIMIT,
        }
    }

    #[must_use]
    pub fn with_places_limit(mut self, limit: usize) -> Self {
        self.places_limit = limit;
        self
    }

    /// Production wiring: Nominatim, Open-Meteo and Overpass clients
    pub fn from_config(config: &TravelGuideConfig) -> Result<Self> {
        let geocoder = NominatimGeocoder::new(&config.geocoding)
            .with_context(|| "Failed to create geocoding client")?;
        let weather = OpenMeteoWeather::new(&config.weather)
            .with_context(|| "Failed to create weather client")?;
        let attractions = OverpassAttractions::new(&config.places)
            .with_context(|| "Failed to create places client")?;

        Ok(
            Self::new(Arc::new(geocoder), Arc::new(weather), Arc::new(attractions))
                .with_places_limit(config.places.default_limit),
        )
    }

    /// Answer one free-text query
    #[instrument(skip(self))]
    pub async fn process_query(&self, query: &str) -> FinalResponse {
        let query = query.trim();
        if query.is_empty() {
            return FinalResponse::invalid_query();
        }

        let parsed = TextParser::parse(query);
        let Some(place) = parsed.place.clone() else {
            info!("No place found in query");
            return FinalResponse::place_not_found();
        };
        let intent = parsed.intent();
        info!(
            "Query for '{}' (weather: {}, places: {})",
            place,
            intent.needs_weather(),
            intent.needs_places()
        );

        let weather_task = intent.needs_weather().then(|| {
            let agent = Arc::clone(&self.weather);
            let place = place.clone();
            tokio::spawn(async move { agent.get_weather(&place).await })
        });
        let places_task = intent.needs_places().then(|| {
            let agent = Arc::clone(&self.places);
            let place = place.clone();
            let limit = self.places_limit;
            tokio::spawn(async move { agent.get_places(&place, limit).await })
        });

        let (weather, places) =
            future::join(settle("weather", weather_task), settle("places", places_task)).await;

        compose_reply(weather.as_ref(), places.as_ref())
    }
}

/// Wait for an agent task; a task that panicked counts as no result
async fn settle<T>(agent: &str, task: Option<JoinHandle<AgentResult<T>>>) -> Option<AgentResult<T>> {
    match task?.await {
        Ok(result) => Some(result),
        Err(e) => {
            warn!("{} agent task failed: {}", agent, e);
            None
        }
    }
}

/// Merge agent outcomes into the reply
fn compose_reply(
    weather: Option<&AgentResult<WeatherReport>>,
    places: Option<&AgentResult<Vec<String>>>,
) -> FinalResponse {
    if weather.is_some_and(AgentResult::is_place_not_found)
        || places.is_some_and(AgentResult::is_place_not_found)
    {
        return FinalResponse::place_not_found();
    }

    let weather_message = weather
        .filter(|result| result.success)
        .map(|result| result.message.as_str());
    let places_message = places
        .filter(|result| result.success)
        .map(|result| result.message.as_str());

    match (weather_message, places_message) {
        (Some(weather), Some(places)) => {
            FinalResponse::answer(format!("{} And {}", weather, continue_places(places)))
        }
        (Some(weather), None) => FinalResponse::answer(weather),
        (None, Some(places)) => FinalResponse::answer(places),
        (None, None) => {
            debug!("No agent produced a message");
            FinalResponse::place_not_found()
        }
    }
}

/// Rewrite a places message so it can follow another sentence
fn continue_places(message: &str) -> String {
    let list = match PLACES_HEADER_PATTERN.captures(message) {
        Some(captures) => captures[1].to_string(),
        None => message.split('\n').skip(2).collect::<Vec<_>>().join("\n"),
    };

    if list.trim().is_empty() {
        return message.to_string();
    }
    format!("{PLACES_CONNECTIVE}\n\n{list}")
}
