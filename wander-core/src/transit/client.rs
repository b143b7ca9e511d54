//! Transit API HTTP client.
//!
//! Async client for the transit query service. Handles credentials,
//! concurrency limiting, and conversion of live boards to domain types.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::{Arrival, Atco, Crs};
use crate::geo::Coordinate;
use crate::nearby::StopSource;

use super::convert::{bus_arrivals, train_arrivals};
use super::error::TransitError;
use super::types::{
    BusLiveResponse, PlaceMember, PlacesResponse, TrainLiveResponse, TransitType,
};

/// Default base URL for the transit API.
const DEFAULT_BASE_URL: &str = "https://transportapi.com/v3";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the transit client.
///
/// The `app_id` / `app_key` credentials are opaque caller-supplied
/// configuration; the client forwards them on every request.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Application id for authentication
    pub app_id: String,
    /// Application key for authentication
    pub app_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Create a new config with the given credentials.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Transit API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
    semaphore: Arc<Semaphore>,
}

impl TransitClient {
    /// Create a new transit client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_id: config.app_id,
            app_key: config.app_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Query places by transit type.
    ///
    /// With `near` set, asks the service to geo-filter server-side by
    /// passing `lat`/`lon`; without it, returns the unfiltered type
    /// listing. Callers that need a radius guarantee belong in
    /// [`crate::nearby`], which wraps both variants.
    pub async fn places_by_type(
        &self,
        transit_type: TransitType,
        near: Option<Coordinate>,
    ) -> Result<Vec<PlaceMember>, TransitError> {
        let mut params = vec![("type", transit_type.query_value().to_string())];
        if let Some(center) = near {
            params.push(("lat", center.latitude().to_string()));
            params.push(("lon", center.longitude().to_string()));
        }

        let response: PlacesResponse = self.fetch_json("/uk/places.json", &params).await?;
        Ok(response.into_members())
    }

    /// Free-text place search ("museum", "park", ...).
    pub async fn places_search(&self, query: &str) -> Result<Vec<PlaceMember>, TransitError> {
        let params = vec![("query", query.to_string())];
        let response: PlacesResponse = self.fetch_json("/uk/places.json", &params).await?;
        Ok(response.into_members())
    }

    /// Live departures for a bus stop, soonest first.
    pub async fn bus_stop_live(&self, atco: &Atco) -> Result<Vec<Arrival>, TransitError> {
        let path = format!("/uk/bus/stop/{}/live.json", atco.as_str());
        let response: BusLiveResponse = self.fetch_json(&path, &[]).await?;
        Ok(bus_arrivals(response))
    }

    /// Live departures for a train station, in board order.
    pub async fn train_station_live(&self, crs: &Crs) -> Result<Vec<Arrival>, TransitError> {
        let path = format!("/uk/train/station/{}/live.json", crs.as_str());
        let response: TrainLiveResponse = self.fetch_json(&path, &[]).await?;
        Ok(train_arrivals(response))
    }

    /// Issue a GET with credentials appended and decode the JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TransitError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransitError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(TransitError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl StopSource for TransitClient {
    async fn stops_near(
        &self,
        transit_type: TransitType,
        center: Coordinate,
    ) -> Result<Vec<PlaceMember>, TransitError> {
        self.places_by_type(transit_type, Some(center)).await
    }

    async fn stops_by_type(
        &self,
        transit_type: TransitType,
    ) -> Result<Vec<PlaceMember>, TransitError> {
        self.places_by_type(transit_type, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = TransitConfig::new("my-id", "my-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(2)
            .with_timeout(30);

        assert_eq!(config.app_id, "my-id");
        assert_eq!(config.app_key, "my-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_defaults() {
        let config = TransitConfig::new("id", "key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let config = TransitConfig::new("id", "key");
        assert!(TransitClient::new(config).is_ok());
    }
}
