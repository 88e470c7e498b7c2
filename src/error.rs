//! Error types and handling for the `travelguide` application

use thiserror::Error;

/// Main error type for the `travelguide` application
#[derive(Error, Debug)]
pub enum TravelGuideError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors talking to an upstream provider
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

}

impl TravelGuideError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without an HTTP status
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new API error for a non-success HTTP status
    pub fn api_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelGuideError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            TravelGuideError::Api {
                status: Some(429), ..
            } => "The upstream service is rate limiting us. Please try again later.".to_string(),
            TravelGuideError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            TravelGuideError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}
