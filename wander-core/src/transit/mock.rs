//! Mock transit client for testing without API access.
//!
//! Serves canned place members as if they were live API responses,
//! either built programmatically or loaded from a JSON file.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::geo::Coordinate;
use crate::nearby::StopSource;

use super::error::TransitError;
use super::types::{PlaceMember, TransitType};

/// On-disk shape for mock data: members keyed by transit type.
#[derive(Debug, Deserialize)]
struct MockData {
    #[serde(default)]
    bus_stop: Vec<PlaceMember>,
    #[serde(default)]
    train_station: Vec<PlaceMember>,
}

/// Mock transit client.
///
/// Useful for development and tests without real API credentials. The
/// geo parameters of `stops_near` are ignored (mock data is static),
/// so both strategy paths see the same candidates. A transit type with
/// no data behaves like a failing remote.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    stops: HashMap<TransitType, Vec<PlaceMember>>,
}

impl MockTransitClient {
    /// Create a mock with no data (every query fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned members for a transit type.
    pub fn with_stops(mut self, transit_type: TransitType, members: Vec<PlaceMember>) -> Self {
        self.stops.insert(transit_type, members);
        self
    }

    /// Load mock data from a JSON file shaped
    /// `{"bus_stop": [...], "train_station": [...]}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TransitError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| TransitError::Api {
            status: 0,
            message: format!("failed to read mock data {:?}: {}", path, e),
        })?;

        let data: MockData = serde_json::from_str(&json).map_err(|e| TransitError::Json {
            message: format!("failed to parse mock data {:?}: {}", path, e),
            body: None,
        })?;

        Ok(Self::new()
            .with_stops(TransitType::BusStop, data.bus_stop)
            .with_stops(TransitType::TrainStation, data.train_station))
    }

    fn lookup(&self, transit_type: TransitType) -> Result<Vec<PlaceMember>, TransitError> {
        self.stops
            .get(&transit_type)
            .cloned()
            .ok_or(TransitError::Api {
                status: 404,
                message: format!("no mock data for type {transit_type}"),
            })
    }
}

impl StopSource for MockTransitClient {
    async fn stops_near(
        &self,
        transit_type: TransitType,
        _center: Coordinate,
    ) -> Result<Vec<PlaceMember>, TransitError> {
        self.lookup(transit_type)
    }

    async fn stops_by_type(
        &self,
        transit_type: TransitType,
    ) -> Result<Vec<PlaceMember>, TransitError> {
        self.lookup(transit_type)
    }
}
