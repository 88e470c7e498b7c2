//! Query understanding
//!
//! Extracts a place name and the requested information categories from a
//! free-text travel question. This is a single-pass keyword/pattern heuristic;
//! it never fails, it only returns less information.

use crate::models::{Intent, ParsedIntent};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Travel cues in priority order. Each must be followed by a capitalized phrase.
const PLACE_CUES: [&str; 6] = ["going to", "go to", "visit", "trip to", "in", "to"];

/// Captures that are question or filler words rather than places
const BANNED_PLACES: [&str; 6] = ["what", "where", "who", "is", "the", "temperature"];

const WEATHER_KEYWORDS: [&str; 11] = [
    "temperature",
    "temp",
    "weather",
    "rain",
    "raining",
    "forecast",
    "climate",
    "hot",
    "cold",
    "sunny",
    "cloudy",
];

const PLACES_KEYWORDS: [&str; 13] = [
    "places",
    "place",
    "attractions",
    "attraction",
    "visit",
    "tourist",
    "sightseeing",
    "see",
    "explore",
    "tour",
    "tourism",
    "plan",
    "trip",
];

/// One pattern per cue: the cue matches in any case, the captured phrase
/// starts with an uppercase letter and runs lazily up to `?.!,` or the end.
static PLACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PLACE_CUES
        .iter()
        .map(|cue| {
            Regex::new(&format!(r"(?i:\b{cue})\s+([A-Z][A-Za-z\s]+?)(?:[?.!,]|$)"))
                .expect("place cue pattern is valid")
        })
        .collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Free-text query parser
pub struct TextParser;

impl TextParser {
    /// Parse place and intent from a query
    #[must_use]
    pub fn parse(input: &str) -> ParsedIntent {
        let place = Self::extract_place(input);
        let intent = Self::extract_intent(input);

        debug!(
            ?place,
            wants_weather = intent.wants_weather,
            wants_places = intent.wants_places,
            "Parsed query"
        );

        ParsedIntent {
            place,
            wants_weather: intent.wants_weather,
            wants_places: intent.wants_places,
        }
    }

    /// Extract a place name, trying cue patterns first and capitalized words last
    #[must_use]
    pub fn extract_place(input: &str) -> Option<String> {
        let cleaned = WHITESPACE.replace_all(input, " ");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }

        for pattern in PLACE_PATTERNS.iter() {
            let Some(captured) = pattern.captures(cleaned).and_then(|c| c.get(1)) else {
                continue;
            };

            let place: String = captured
                .as_str()
                .chars()
                .filter(|c| !matches!(c, '?' | '.' | '!' | ','))
                .collect();
            let place = place.trim();

            // A filler word must not stop a later cue from matching
            if BANNED_PLACES.contains(&place.to_lowercase().as_str()) {
                continue;
            }

            return Some(place.to_string());
        }

        Self::capitalized_run(cleaned)
    }

    /// First run of consecutive capitalized words, e.g. "New York"
    fn capitalized_run(cleaned: &str) -> Option<String> {
        let words: Vec<&str> = cleaned.split(' ').collect();
        let start = words.iter().position(|w| is_capitalized_word(w))?;

        let run: Vec<&str> = words[start..]
            .iter()
            .take_while(|w| is_capitalized_word(w))
            .copied()
            .collect();

        Some(run.join(" "))
    }

    /// Work out whether the user asks about weather, places, or both
    #[must_use]
    pub fn extract_intent(input: &str) -> Intent {
        let lower = input.to_lowercase();

        let wants_weather = WEATHER_KEYWORDS.iter().any(|k| lower.contains(k));
        let wants_places = PLACES_KEYWORDS.iter().any(|k| lower.contains(k));

        // "plan" and "trip" are already place keywords, so this never fires today
        if !wants_weather && !wants_places && (lower.contains("plan") || lower.contains("trip")) {
            return Intent {
                wants_weather: false,
                wants_places: true,
            };
        }

        Intent {
            wants_weather,
            wants_places,
        }
    }
}

/// One ASCII uppercase letter followed by one or more lowercase letters
fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}
