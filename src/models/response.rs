//! Result envelopes passed from agents to the coordinator and back to the caller

use serde::{Deserialize, Serialize};

/// Reply for every query whose place cannot be resolved. Compared by string
/// equality across agents and the coordinator.
pub const PLACE_NOT_FOUND_MESSAGE: &str = "I don't know this place exists";

/// Reply for an empty or malformed query
pub const INVALID_QUERY_MESSAGE: &str =
    "Please provide a valid query about a place you want to visit.";

/// Uniform result returned by every agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult<T> {
    pub success: bool,
    /// Always human readable, also on failure
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AgentResult<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    #[must_use]
    pub fn place_not_found() -> Self {
        Self {
            success: false,
            message: PLACE_NOT_FOUND_MESSAGE.to_string(),
            data: None,
        }
    }

    #[must_use]
    pub fn is_place_not_found(&self) -> bool {
        !self.success && self.message == PLACE_NOT_FOUND_MESSAGE
    }
}

/// Reply handed back to the caller of the coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResponse {
    pub success: bool,
    pub message: String,
}

impl FinalResponse {
    pub fn answer(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn place_not_found() -> Self {
        Self {
            success: false,
            message: PLACE_NOT_FOUND_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn invalid_query() -> Self {
        Self {
            success: false,
            message: INVALID_QUERY_MESSAGE.to_string(),
        }
    }
}
