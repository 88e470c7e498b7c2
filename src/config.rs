//! Configuration management for the `travelguide` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TravelGuideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure for the `travelguide` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelGuideConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Geocoding provider settings
    pub geocoding: GeocodingConfig,
    /// Weather provider settings
    pub weather: WeatherConfig,
    /// Attractions provider settings
    pub places: PlacesConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Upper bound for handling a single request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// PEM certificate chain, enables HTTPS together with `tls_key_path`
    #[serde(default)]
    pub tls_cert_path: Option<PathBuf>,
    /// PEM private key
    #[serde(default)]
    pub tls_key_path: Option<PathBuf>,
}

/// Geocoding (Nominatim) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_seconds: u32,
    /// Nominatim rejects requests without an identifying user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Weather (Open-Meteo) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Attractions (Overpass) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    #[serde(default = "default_places_timeout")]
    pub timeout_seconds: u32,
    /// Search radius around the resolved coordinates
    #[serde(default = "default_places_radius")]
    pub radius_meters: u32,
    /// Number of attractions listed per reply
    #[serde(default = "default_places_limit")]
    pub default_limit: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP traces endpoint; span export is disabled when unset
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    60
}

fn default_body_limit() -> usize {
    64 * 1024
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoding_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("travelguide/{}", env!("CARGO_PKG_VERSION"))
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_places_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_places_timeout() -> u32 {
    30
}

fn default_places_radius() -> u32 {
    10_000
}

fn default_places_limit() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
            body_limit_bytes: default_body_limit(),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_geocoding_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_places_base_url(),
            timeout_seconds: default_places_timeout(),
            radius_meters: default_places_radius(),
            default_limit: default_places_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.into())
    }

    /// Certificate and key paths, when HTTPS is configured
    #[must_use]
    pub fn tls_paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        self.tls_cert_path.as_ref().zip(self.tls_key_path.as_ref())
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl PlacesConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl TravelGuideConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVELGUIDE_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("TRAVELGUIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelguide").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.server.body_limit_bytes == 0 {
            self.server.body_limit_bytes = default_body_limit();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_geocoding_timeout();
        }
        if self.geocoding.user_agent.is_empty() {
            self.geocoding.user_agent = default_user_agent();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_places_timeout();
        }
        if self.places.radius_meters == 0 {
            self.places.radius_meters = default_places_radius();
        }
        if self.places.default_limit == 0 {
            self.places.default_limit = default_places_limit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_tls()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(TravelGuideError::config("Server port cannot be 0"));
        }

        let timeouts = [
            ("Geocoding", self.geocoding.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
            ("Places", self.places.timeout_seconds),
            ("Server request", self.server.request_timeout_seconds),
        ];
        for (name, seconds) in timeouts {
            if seconds > 300 {
                return Err(TravelGuideError::config(format!(
                    "{name} timeout cannot exceed 300 seconds"
                )));
            }
        }

        if self.places.default_limit > 50 {
            return Err(TravelGuideError::config(
                "Places default limit cannot exceed 50",
            ));
        }

        if self.places.radius_meters > 50_000 {
            return Err(TravelGuideError::config(
                "Places search radius cannot exceed 50000 meters",
            ));
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> crate::Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        let base_urls = [
            ("Geocoding", &self.geocoding.base_url),
            ("Weather", &self.weather.base_url),
            ("Places", &self.places.base_url),
        ];
        for (name, url) in base_urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TravelGuideError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        Ok(())
    }

    fn validate_tls(&self) -> crate::Result<()> {
        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(TravelGuideError::config(
                "TLS requires both tls_cert_path and tls_key_path",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TravelGuideConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.geocoding.timeout_seconds, 10);
        assert_eq!(config.weather.timeout_seconds, 10);
        assert_eq!(config.places.timeout_seconds, 30);
        assert_eq!(config.places.radius_meters, 10_000);
        assert_eq!(config.places.default_limit, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.otlp_endpoint.is_none());
        assert!(config.server.tls_paths().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_user_agent_identifies_application() {
        let config = TravelGuideConfig::default();
        assert!(config.geocoding.user_agent.starts_with("travelguide/"));
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = TravelGuideConfig::default();
        config.weather.base_url.clear();
        config.places.default_limit = 0;
        config.logging.format.clear();

        config.apply_defaults();

        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.places.default_limit, 5);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TravelGuideConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TravelGuideConfig::default();
        config.places.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = TravelGuideConfig::default();
        config.places.default_limit = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = TravelGuideConfig::default();
        config.geocoding.base_url = "nominatim.openstreetmap.org".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Geocoding base URL"));
    }

    #[test]
    fn test_config_validation_tls_pair() {
        let mut config = TravelGuideConfig::default();
        config.server.tls_cert_path = Some(PathBuf::from("cert.pem"));
        assert!(config.validate().is_err());

        config.server.tls_key_path = Some(PathBuf::from("key.pem"));
        assert!(config.validate().is_ok());
        assert!(config.server.tls_paths().is_some());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("travelguide-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8088\n\n[places]\ndefault_limit = 3\n",
        )
        .unwrap();

        let config = TravelGuideConfig::load_from_path(Some(path)).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.places.default_limit, 3);
        assert_eq!(config.places.timeout_seconds, 30);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TravelGuideConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelguide"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
