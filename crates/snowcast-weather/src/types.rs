use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snowcast_core::NetworkError;

use crate::icon::IconCategory;

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A place returned by the geocoder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(rename = "admin1", default, skip_serializing_if = "Option::is_none")]
    pub admin_region: Option<String>,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// Label shown in the suggestion list, e.g. "Munich, Bavaria, Germany"
    pub fn label(&self) -> String {
        match self.admin_region.as_deref() {
            Some(region) if !region.is_empty() => {
                format!("{}, {}, {}", self.name, region, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_ms: f64,
    pub weather_code: i32,
}

impl CurrentConditions {
    pub fn icon(&self) -> IconCategory {
        IconCategory::from_code(self.weather_code)
    }
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub weather_code: i32,
    pub max_wind_ms: f64,
    pub precipitation_mm: f64,
}

impl DailyForecastEntry {
    pub fn icon(&self) -> IconCategory {
        IconCategory::from_code(self.weather_code)
    }
}

/// Current conditions plus the daily forecast window, always replaced together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// Chronological, in provider order
    pub daily: Vec<DailyForecastEntry>,
}

/// Device location errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unavailable,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Geocoder and weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    NotFound(String),
    #[error("No weather data")]
    NoData,
    #[error("Search query is empty")]
    EmptyQuery,
    #[error("Weather API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Parse error: {0}")]
    Parse(String),
}
