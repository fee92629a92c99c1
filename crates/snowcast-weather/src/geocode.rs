//! Forward geocoding: resolve a free-text place name to candidate locations.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use snowcast_core::{Config, ReqwestErrorExt};
use std::sync::Arc;
use std::time::Duration;

use crate::provider::{build_client, decode_json};
use crate::types::{LocationCandidate, WeatherError};

/// Anything that can turn query text into candidate locations
#[async_trait]
pub trait LocationSearch: Send + Sync {
    /// Up to `limit` candidates for `query`; an empty vec when nothing matches.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<LocationCandidate>, WeatherError>;

    /// Exactly one candidate, or [`WeatherError::NotFound`].
    async fn resolve_single(&self, query: &str) -> Result<LocationCandidate, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Omitted entirely when nothing matches
    #[serde(default)]
    results: Vec<LocationCandidate>,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Arc<Client>,
    search_url: String,
    language: String,
}

impl Geocoder {
    pub fn new(
        search_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        Ok(Self {
            client: Arc::new(build_client(timeout)?),
            search_url: search_url.into(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        Self::new(
            config.weather.geocoding_url.clone(),
            config.ui.language.tag(),
            Duration::from_secs(config.weather.request_timeout_secs),
        )
    }

    /// Search for places matching `query`.
    ///
    /// One request per call, no caching and no retry. Callers filter out
    /// too-short input; blank input fails with [`WeatherError::EmptyQuery`].
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<LocationCandidate>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }

        tracing::debug!("Geocoding {:?} (limit {})", query, limit);

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("name", query.to_string()),
                ("count", limit.to_string()),
                ("language", self.language.clone()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.into_network_error()))?;

        let body: SearchResponse = decode_json(response).await?;
        tracing::debug!("Geocoder returned {} candidates", body.results.len());
        Ok(body.results)
    }

    /// Resolve `query` to its single best match.
    pub async fn resolve_single(&self, query: &str) -> Result<LocationCandidate, WeatherError> {
        self.search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(query.trim().to_string()))
    }
}

#[async_trait]
impl LocationSearch for Geocoder {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<LocationCandidate>, WeatherError> {
        Geocoder::search(self, query, limit).await
    }

    async fn resolve_single(&self, query: &str) -> Result<LocationCandidate, WeatherError> {
        Geocoder::resolve_single(self, query).await
    }
}
