//! The place model served by the places API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geo::Coordinate;

use super::stop::TransitStop;

/// A place of interest.
///
/// Created from a places API response, optionally enriched with nearby
/// transport, and stored verbatim when the user favorites it. Stored
/// snapshots are not normalized and may diverge from live search results.
///
/// The upstream API is loosely typed: coordinates can be absent and the
/// `nearby*` lists arrive either as JSON arrays or as JSON-encoded
/// strings. Deserialization normalizes the lists to `Vec<TransitStop>`
/// and yields an empty list for anything malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,

    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(
        rename = "nearbyBusStops",
        default,
        deserialize_with = "lenient_stops",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub nearby_bus_stops: Vec<TransitStop>,

    #[serde(
        rename = "nearbyTrainStations",
        default,
        deserialize_with = "lenient_stops",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub nearby_train_stations: Vec<TransitStop>,

    /// Hotel data passed through untouched for the UI layer.
    #[serde(
        rename = "nearbyHotels",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nearby_hotels: Option<Value>,

    /// Weather data passed through untouched for the UI layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Value>,
}

impl Place {
    /// The place's location, when the API supplied valid coordinates.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let (lat, lon) = (self.latitude?, self.longitude?);
        Coordinate::new(lat, lon).ok()
    }

    /// The closest known bus stop, if any were attached to this place.
    pub fn nearest_bus_stop(&self) -> Option<&TransitStop> {
        self.nearby_bus_stops
            .iter()
            .min_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
    }
}

/// Accept a stop list as an array, a JSON-encoded string, or anything
/// else (which becomes an empty list).
fn lenient_stops<'de, D>(deserializer: D) -> Result<Vec<TransitStop>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stops_from_value(value))
}

fn stops_from_value(value: Value) -> Vec<TransitStop> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => serde_json::from_str(&s).unwrap_or_default(),
        other => serde_json::from_value(other).unwrap_or_default(),
    }
}
