//! Places API client.

use crate::domain::Place;

use super::error::PlacesError;

/// Default base URL for the places API.
const DEFAULT_BASE_URL: &str = "https://6926adf126e7e41498fb2320.mockapi.io/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a config pointing at the default places API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the places API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlacesClient {
    /// Create a new places client.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch every place the API knows about.
    pub async fn fetch_all(&self) -> Result<Vec<Place>, PlacesError> {
        let url = format!("{}/places", self.base_url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PlacesError::Json {
            message: e.to_string(),
        })
    }

    /// Search places by a free-text query.
    ///
    /// The remote endpoint has no query support, so this fetches the
    /// collection and filters client-side over name, type and
    /// description. An empty query returns everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        let places = self.fetch_all().await?;
        Ok(filter_places(places, query))
    }
}

/// Case-insensitive substring match over name, type and description.
fn filter_places(places: Vec<Place>, query: &str) -> Vec<Place> {
    if query.is_empty() {
        return places;
    }

    let needle = query.to_lowercase();

    places
        .into_iter()
        .filter(|place| {
            place.name.to_lowercase().contains(&needle)
                || place
                    .place_type
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
                || place
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}
