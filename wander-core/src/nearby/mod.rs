//! Nearby transport resolution.
//!
//! Given a place's coordinates, determines which bus stops and train
//! stations are nearby and in what order: a primary server-filtered
//! query with a client-side fallback, and an aggregator that runs both
//! transit types concurrently and never fails as a unit.

mod aggregate;
mod strategy;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::geo::Coordinate;
use crate::transit::{PlaceMember, TransitError};

pub use aggregate::{
    BUS_STOP_RADIUS_METERS, NearbyTransportResult, TRAIN_STATION_RADIUS_METERS,
    aggregate_nearby_transport,
};
pub use strategy::{DEFAULT_MAX_DISTANCE_METERS, NearbyError, find_nearby};

pub use crate::transit::TransitType;

/// Source of transit stop candidates.
///
/// This abstraction allows the search strategy to be tested against a
/// mocked transport layer, with both the primary and fallback paths
/// exercised independently.
#[allow(async_fn_in_trait)]
pub trait StopSource {
    /// Query stops of a type near a coordinate, geo-filtered server-side.
    async fn stops_near(
        &self,
        transit_type: TransitType,
        center: Coordinate,
    ) -> Result<Vec<PlaceMember>, TransitError>;

    /// Query all stops of a type, unfiltered.
    async fn stops_by_type(
        &self,
        transit_type: TransitType,
    ) -> Result<Vec<PlaceMember>, TransitError>;
}

/// Best-effort cancellation for an in-progress nearby lookup.
///
/// Once cancelled, the strategy stops issuing further requests (in
/// particular the fallback query) and completes with whatever was
/// already computed; branches that had not finished yield empty lists.
/// An HTTP request already in flight is not aborted; the client timeout
/// bounds it.
///
/// Tokens are cheap to clone and safe to trigger from another task.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been triggered.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
