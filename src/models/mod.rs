//! Data models for the travelguide application
//!
//! This module contains the domain models organized by concern:
//! - Location: resolved coordinates for a place name
//! - Weather: provider readings and the weather agent's report
//! - Intent: what the parser understood from a query
//! - Response: agent result envelope and the final reply

pub mod intent;
pub mod location;
pub mod response;
pub mod weather;

// Re-export all public types for convenient access
pub use intent::{Intent, ParsedIntent};
pub use location::Coordinates;
pub use response::{AgentResult, FinalResponse, INVALID_QUERY_MESSAGE, PLACE_NOT_FOUND_MESSAGE};
pub use weather::{CurrentWeather, WeatherReport};
