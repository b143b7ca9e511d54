//! Primary/fallback nearby stop search.
//!
//! The strategy first asks the remote service to geo-filter; if that
//! query fails for any reason the failure is absorbed and a plain
//! type listing is filtered and sorted client-side. Only a fallback
//! failure is reported to the caller.

use tracing::debug;

use crate::domain::TransitStop;
use crate::geo::Coordinate;
use crate::transit::{PlaceMember, TransitType, stop_from_member};

use super::{CancelToken, StopSource};

/// Default search radius in meters when the caller has no tighter bound.
pub const DEFAULT_MAX_DISTANCE_METERS: f64 = 5_000.0;

/// Error from the nearby search strategy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NearbyError {
    /// Both the primary and the fallback remote queries failed.
    #[error("remote query failed for {transit_type}: {message}")]
    RemoteQueryFailed {
        transit_type: TransitType,
        message: String,
    },
}

/// Find stops of `transit_type` within `max_distance_meters` of `center`.
///
/// Primary path: a single server-side geo-filtered query. Its results
/// are returned in server order, with distances computed locally and
/// candidates lacking usable coordinates dropped.
///
/// Fallback path, taken on any primary failure: an unfiltered type
/// query, filtered to the radius and stable-sorted ascending by
/// distance (equal distances keep input order).
///
/// The primary failure is never surfaced; it is logged and absorbed.
/// Only a fallback failure returns [`NearbyError::RemoteQueryFailed`].
/// A triggered `cancel` token short-circuits to an empty list instead
/// of issuing further requests.
pub async fn find_nearby<S: StopSource>(
    source: &S,
    center: Coordinate,
    transit_type: TransitType,
    max_distance_meters: f64,
    cancel: &CancelToken,
) -> Result<Vec<TransitStop>, NearbyError> {
    if cancel.is_cancelled() {
        return Ok(Vec::new());
    }

    match source.stops_near(transit_type, center).await {
        Ok(members) => return Ok(normalize(&members, center)),
        Err(e) => {
            debug!(%transit_type, error = %e, "geo-filtered query failed, using fallback");
        }
    }

    if cancel.is_cancelled() {
        return Ok(Vec::new());
    }

    let members =
        source
            .stops_by_type(transit_type)
            .await
            .map_err(|e| NearbyError::RemoteQueryFailed {
                transit_type,
                message: e.to_string(),
            })?;

    let mut stops: Vec<TransitStop> = normalize(&members, center)
        .into_iter()
        .filter(|stop| stop.distance_meters <= max_distance_meters)
        .collect();

    // Stable: equal distances keep candidate order
    stops.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

    Ok(stops)
}

/// Convert raw members to domain stops, dropping unusable candidates.
fn normalize(members: &[PlaceMember], center: Coordinate) -> Vec<TransitStop> {
    members
        .iter()
        .filter_map(|member| {
            let stop = stop_from_member(member, center);
            if stop.is_none() {
                debug!(
                    name = member.name.as_deref().unwrap_or("<unnamed>"),
                    "skipping candidate without usable coordinates"
                );
            }
            stop
        })
        .collect()
}
