//! Forecast retrieval from the Open-Meteo forecast endpoint.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snowcast_core::{NetworkError, ReqwestErrorExt, WeatherConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::types::{
    Coordinates, CurrentConditions, DailyForecastEntry, WeatherError, WeatherReport,
};

/// Daily fields requested alongside the current conditions
pub const DAILY_FIELDS: &str =
    "weathercode,temperature_2m_min,temperature_2m_max,precipitation_sum,windspeed_10m_max";

/// Anything that can produce a weather report for a pair of coordinates
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<RawCurrentWeather>,
    daily: Option<RawDaily>,
}

#[derive(Debug, Deserialize)]
struct RawCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<NaiveDate>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
    weathercode: Vec<i32>,
    windspeed_10m_max: Vec<f64>,
    precipitation_sum: Vec<f64>,
}

impl RawDaily {
    /// Zip the parallel arrays into entries, rejecting ragged responses
    fn into_entries(self) -> Result<Vec<DailyForecastEntry>, WeatherError> {
        let len = self.time.len();
        let lengths = [
            self.temperature_2m_min.len(),
            self.temperature_2m_max.len(),
            self.weathercode.len(),
            self.windspeed_10m_max.len(),
            self.precipitation_sum.len(),
        ];
        if lengths.iter().any(|&l| l != len) {
            return Err(WeatherError::Parse(format!(
                "daily arrays have mismatched lengths: time={} others={:?}",
                len, lengths
            )));
        }

        let entries = self
            .time
            .into_iter()
            .enumerate()
            .map(|(i, date)| DailyForecastEntry {
                date,
                min_temp_c: self.temperature_2m_min[i],
                max_temp_c: self.temperature_2m_max[i],
                weather_code: self.weathercode[i],
                max_wind_ms: self.windspeed_10m_max[i],
                precipitation_mm: self.precipitation_sum[i],
            })
            .collect();
        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: String,
}

/// Read a response body as JSON, turning provider error bodies into `WeatherError::Api`.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WeatherError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| WeatherError::Network(e.into_network_error()))?;

    if !status.is_success() {
        if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(&body) {
            return Err(WeatherError::Api(api_error.reason));
        }
        return Err(WeatherError::Network(NetworkError::ServerError {
            status: status.as_u16(),
            message: body,
        }));
    }

    serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))
}

/// Build the shared HTTP client used by the geocoder and the provider
pub(crate) fn build_client(timeout: Duration) -> Result<Client, WeatherError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("snowcast/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WeatherError::Network(e.into_network_error()))
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    forecast_url: String,
}

impl WeatherProvider {
    pub fn new(forecast_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Arc::new(build_client(timeout)?),
            forecast_url: forecast_url.into(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        Self::new(
            config.forecast_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Fetch current conditions and the daily forecast for a location.
    ///
    /// A response without `current_weather` fails with [`WeatherError::NoData`].
    pub async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherError> {
        tracing::debug!(
            "Fetching weather for {}, {}",
            coordinates.latitude,
            coordinates.longitude
        );

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", coordinates.latitude.to_string()),
                ("longitude", coordinates.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
                ("wind_speed_unit", "ms".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let body: ForecastResponse = decode_json(response).await?;

        let current = body.current_weather.ok_or(WeatherError::NoData)?;
        let daily = body
            .daily
            .ok_or_else(|| WeatherError::Parse("response has no daily forecast".to_string()))?
            .into_entries()?;

        tracing::info!("Weather fetched: {} forecast days", daily.len());

        Ok(WeatherReport {
            current: CurrentConditions {
                temperature_c: current.temperature,
                wind_speed_ms: current.windspeed,
                weather_code: current.weathercode,
            },
            daily,
        })
    }
}

#[async_trait]
impl ForecastSource for WeatherProvider {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherError> {
        WeatherProvider::fetch(self, coordinates).await
    }
}
