//! Two-branch transport aggregation.
//!
//! Runs the nearby search for bus stops and train stations at the same
//! time and merges the results. A branch that fails contributes an
//! empty list; the aggregate itself never fails.

use tracing::warn;

use crate::domain::TransitStop;
use crate::geo::Coordinate;
use crate::transit::TransitType;

use super::{CancelToken, StopSource, find_nearby};

/// Search radius for bus stops, meters.
pub const BUS_STOP_RADIUS_METERS: f64 = 2_000.0;

/// Search radius for train stations, meters.
pub const TRAIN_STATION_RADIUS_METERS: f64 = 5_000.0;

/// Nearby transport for one place.
///
/// Ephemeral: recomputed on every request and owned by the caller.
/// Empty lists mean "nothing found or the lookup failed"; callers that
/// care about the difference can watch the log channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyTransportResult {
    pub bus_stops: Vec<TransitStop>,
    pub train_stations: Vec<TransitStop>,
}

/// Resolve nearby transport around `center`.
///
/// Both transit-type lookups are issued at the same logical time and
/// run independently to completion; there is no ordering between them
/// and no shared state. A failure in one branch is logged and mapped to
/// an empty list without touching the other branch's result.
pub async fn aggregate_nearby_transport<S: StopSource>(
    source: &S,
    center: Coordinate,
    cancel: &CancelToken,
) -> NearbyTransportResult {
    let (bus_stops, train_stations) = tokio::join!(
        find_nearby(
            source,
            center,
            TransitType::BusStop,
            BUS_STOP_RADIUS_METERS,
            cancel,
        ),
        find_nearby(
            source,
            center,
            TransitType::TrainStation,
            TRAIN_STATION_RADIUS_METERS,
            cancel,
        ),
    );

    NearbyTransportResult {
        bus_stops: bus_stops.unwrap_or_else(|e| {
            warn!(error = %e, "nearby bus stop lookup failed");
            Vec::new()
        }),
        train_stations: train_stations.unwrap_or_else(|e| {
            warn!(error = %e, "nearby train station lookup failed");
            Vec::new()
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::transit::{PlaceMember, TransitError};

    fn center() -> Coordinate {
        Coordinate::new(51.5074, -0.1278).unwrap()
    }

    fn member(name: &str, lat: f64, lon: f64) -> PlaceMember {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "latitude": lat,
            "longitude": lon,
        }))
        .unwrap()
    }

    /// Mock with per-type fallback data; the primary path always fails,
    /// and a type with no data fails the fallback too. An optional delay
    /// simulates network latency on every call.
    struct TypedSource {
        by_type: HashMap<TransitType, Vec<PlaceMember>>,
        delay: Option<Duration>,
    }

    impl TypedSource {
        fn new() -> Self {
            Self {
                by_type: HashMap::new(),
                delay: None,
            }
        }

        fn with_stops(mut self, transit_type: TransitType, members: Vec<PlaceMember>) -> Self {
            self.by_type.insert(transit_type, members);
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        async fn simulate_latency(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    impl StopSource for TypedSource {
        async fn stops_near(
            &self,
            _transit_type: TransitType,
            _center: Coordinate,
        ) -> Result<Vec<PlaceMember>, TransitError> {
            self.simulate_latency().await;
            Err(TransitError::Api {
                status: 400,
                message: "unsupported parameter: lat".to_string(),
            })
        }

        async fn stops_by_type(
            &self,
            transit_type: TransitType,
        ) -> Result<Vec<PlaceMember>, TransitError> {
            self.simulate_latency().await;
            self.by_type
                .get(&transit_type)
                .cloned()
                .ok_or(TransitError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn merges_both_branches() {
        let source = TypedSource::new()
            .with_stops(
                TransitType::BusStop,
                vec![member("Strand", 51.5080, -0.1275)],
            )
            .with_stops(
                TransitType::TrainStation,
                vec![member("Charing Cross", 51.5081, -0.1248)],
            );

        let result = aggregate_nearby_transport(&source, center(), &CancelToken::new()).await;

        assert_eq!(result.bus_stops.len(), 1);
        assert_eq!(result.train_stations.len(), 1);
        assert_eq!(result.bus_stops[0].name, "Strand");
        assert_eq!(result.train_stations[0].name, "Charing Cross");
    }

    #[tokio::test]
    async fn branch_failure_is_isolated() {
        // Surface the absorbed-failure warnings in test output
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        // No bus data at all: that branch fails both paths
        let source = TypedSource::new().with_stops(
            TransitType::TrainStation,
            vec![member("Charing Cross", 51.5081, -0.1248)],
        );

        let result = aggregate_nearby_transport(&source, center(), &CancelToken::new()).await;

        assert!(result.bus_stops.is_empty());
        assert_eq!(result.train_stations.len(), 1);
    }

    #[tokio::test]
    async fn total_failure_yields_empty_result() {
        let source = TypedSource::new();

        let result = aggregate_nearby_transport(&source, center(), &CancelToken::new()).await;

        assert_eq!(result, NearbyTransportResult::default());
    }

    #[tokio::test(start_paused = true)]
    async fn branches_run_concurrently() {
        // Each branch makes two calls (primary then fallback) at 100ms
        // each: 200ms per branch, 400ms if the branches were serial.
        let source = TypedSource::new()
            .with_stops(
                TransitType::BusStop,
                vec![member("Strand", 51.5080, -0.1275)],
            )
            .with_stops(
                TransitType::TrainStation,
                vec![member("Charing Cross", 51.5081, -0.1248)],
            )
            .with_delay(Duration::from_millis(100));

        let started = tokio::time::Instant::now();
        let result = aggregate_nearby_transport(&source, center(), &CancelToken::new()).await;
        let elapsed = started.elapsed();

        assert_eq!(result.bus_stops.len(), 1);
        assert_eq!(result.train_stations.len(), 1);
        assert!(
            elapsed < Duration::from_millis(300),
            "branches appear to have run serially: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let source = TypedSource::new().with_stops(
            TransitType::BusStop,
            vec![member("Strand", 51.5080, -0.1275)],
        );
        let token = CancelToken::new();
        token.cancel();

        let result = aggregate_nearby_transport(&source, center(), &token).await;

        assert_eq!(result, NearbyTransportResult::default());
    }
}
