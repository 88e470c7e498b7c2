//! Sub-agents
//!
//! Each agent turns a place name into one category of information: it
//! geocodes the place, asks its provider, and formats a reply. Agents never
//! return errors; every failure becomes the place-not-found result.

pub mod places;
pub mod weather;

pub use places::{PlacesAgent, DEFAULT_PLACES_LIMIT, PLACES_CONNECTIVE, PLACES_HEADER};
pub use weather::WeatherAgent;
