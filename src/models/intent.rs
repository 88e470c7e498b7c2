//! What the parser understood from a query

use serde::{Deserialize, Serialize};

/// Which categories of information the user asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub wants_weather: bool,
    pub wants_places: bool,
}

impl Intent {
    /// Places are the fallback when the query names neither category
    #[must_use]
    pub fn needs_places(&self) -> bool {
        self.wants_places || !self.wants_weather
    }

    #[must_use]
    pub fn needs_weather(&self) -> bool {
        self.wants_weather
    }
}

/// Result of parsing one query. `place == None` means no place could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub place: Option<String>,
    pub wants_weather: bool,
    pub wants_places: bool,
}

impl ParsedIntent {
    #[must_use]
    pub fn intent(&self) -> Intent {
        Intent {
            wants_weather: self.wants_weather,
            wants_places: self.wants_places,
        }
    }
}
