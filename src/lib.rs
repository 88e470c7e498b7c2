//! `TravelGuide` - Multi-agent tourism assistant
//!
//! This library turns free-text travel questions into a conversational answer
//! about the current weather and the attractions worth visiting at a place.
//! A parser extracts the place and intent, a coordinator runs the weather and
//! places agents concurrently, and both agents talk to public geodata APIs
//! through injectable collaborator traits.

pub mod agents;
pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use agents::{PlacesAgent, WeatherAgent};
pub use config::TravelGuideConfig;
pub use coordinator::Coordinator;
pub use error::TravelGuideError;
pub use models::{AgentResult, Coordinates, CurrentWeather, FinalResponse, ParsedIntent};
pub use parser::TextParser;
pub use services::{AttractionsProvider, Geocoder, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelGuideError>;
