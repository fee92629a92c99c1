use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Weather provider endpoints
    #[serde(default)]
    pub weather: WeatherConfig,

    /// City suggestion behaviour
    #[serde(default)]
    pub suggestions: SuggestionsConfig,

    /// Device position source
    #[serde(default)]
    pub location: LocationConfig,
}

/// Display language for labels, dates and geocoder results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

impl Language {
    /// Language tag sent to the geocoding endpoint
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Geocoding search endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    /// Quiet period after the last keystroke before searching (default: 300)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Maximum candidates requested per search (default: 8)
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Minimum trimmed input length that triggers a search (default: 2)
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_limit() -> u32 {
    8
}

fn default_min_query_chars() -> usize {
    2
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            limit: default_limit(),
            min_query_chars: default_min_query_chars(),
        }
    }
}

/// Where the terminal host gets its "device" position from.
///
/// Without coordinates geolocation is reported as unsupported; with
/// `enabled = false` it is reported as denied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_enabled")]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn default_location_enabled() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: default_location_enabled(),
            latitude: None,
            longitude: None,
        }
    }
}

impl LocationConfig {
    /// Configured coordinates, if both halves are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl Config {
    /// Load configuration from the default location, using defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, using defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(e.to_string()))
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()))
                .context("Configuration validation failed");
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.geocoding_url, "weather.geocoding_url", &mut result);
        self.validate_url(&self.weather.forecast_url, "weather.forecast_url", &mut result);

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        if self.suggestions.debounce_ms == 0 {
            result.add_warning(
                "suggestions.debounce_ms",
                "Debounce disabled (0 ms), every keystroke will query the geocoder",
            );
        }

        if self.suggestions.limit == 0 {
            result.add_error("suggestions.limit", "Suggestion limit must be greater than 0");
        } else if self.suggestions.limit > 100 {
            result.add_warning(
                "suggestions.limit",
                "Suggestion limit above 100 is capped by the geocoder",
            );
        }

        if self.suggestions.min_query_chars == 0 {
            result.add_warning(
                "suggestions.min_query_chars",
                "Empty input will trigger suggestion searches",
            );
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within -90..90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("location.longitude", "Longitude must be within -180..180");
                }
            }
            (None, None) => {}
            _ => {
                result.add_error(
                    "location",
                    "Latitude and longitude must be set together",
                );
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("snowcast");

        Ok(config_dir.join("config.toml"))
    }
}
