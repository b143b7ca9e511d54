//! Transit API response DTOs.
//!
//! These map directly to the transit API JSON. Fields use `Option`
//! liberally and coordinates arrive as either numbers or strings; the
//! strict domain types are produced by `convert`, not here.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The two transit types the nearby lookup understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitType {
    BusStop,
    TrainStation,
}

impl TransitType {
    /// Value of the `type` query parameter for this transit type.
    pub fn query_value(&self) -> &'static str {
        match self {
            TransitType::BusStop => "bus_stop",
            TransitType::TrainStation => "train_station",
        }
    }
}

impl fmt::Display for TransitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

/// Response from `GET /uk/places.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    /// Matching places. Absent when the query matched nothing.
    #[serde(default)]
    pub member: Option<Vec<PlaceMember>>,
}

impl PlacesResponse {
    /// The member list, treating an absent field as empty.
    pub fn into_members(self) -> Vec<PlaceMember> {
        self.member.unwrap_or_default()
    }
}

/// One entry in a places response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceMember {
    /// Stop or station name.
    #[serde(default)]
    pub name: Option<String>,

    /// Latitude in degrees; the API sends a number or a numeric string.
    #[serde(default, deserialize_with = "flexible_f64")]
    pub latitude: Option<f64>,

    /// Longitude in degrees; same flexible encoding as latitude.
    #[serde(default, deserialize_with = "flexible_f64")]
    pub longitude: Option<f64>,

    /// ATCO code for bus stops.
    #[serde(default)]
    pub atcocode: Option<String>,

    /// CRS code for train stations.
    #[serde(default)]
    pub station_code: Option<String>,

    /// Place type as reported by the API ("bus_stop", "train_station", ...).
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
}

/// Response from `GET /uk/bus/stop/{atco}/live.json`.
///
/// Departures are grouped by line.
#[derive(Debug, Clone, Deserialize)]
pub struct BusLiveResponse {
    #[serde(default)]
    pub departures: Option<HashMap<String, Vec<BusDeparture>>>,
}

/// One live bus departure.
#[derive(Debug, Clone, Deserialize)]
pub struct BusDeparture {
    #[serde(default)]
    pub line_name: Option<String>,

    #[serde(default)]
    pub line: Option<String>,

    /// Headsign; where the bus is going.
    #[serde(default)]
    pub direction: Option<String>,

    /// Timetabled departure, "HH:MM".
    #[serde(default)]
    pub aimed_departure_time: Option<String>,

    /// Live estimate, "HH:MM". Preferred over the aimed time when present.
    #[serde(default)]
    pub best_departure_estimate: Option<String>,
}

/// Response from `GET /uk/train/station/{crs}/live.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainLiveResponse {
    #[serde(default)]
    pub departures: Option<TrainDepartures>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainDepartures {
    #[serde(default)]
    pub all: Vec<TrainDeparture>,
}

/// One live train departure.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainDeparture {
    /// Operator name ("Southern").
    #[serde(default)]
    pub operator_name: Option<String>,

    #[serde(default)]
    pub destination_name: Option<String>,

    #[serde(default)]
    pub platform: Option<String>,

    /// Timetabled departure, "HH:MM".
    #[serde(default)]
    pub aimed_departure_time: Option<String>,

    /// Live estimate, "HH:MM".
    #[serde(default)]
    pub expected_departure_time: Option<String>,
}

/// Accept a float, a numeric string, or null. Anything unparseable
/// becomes `None` rather than failing the whole response.
fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_with_numeric_coordinates() {
        let json = r#"{"name": "Aldwych", "latitude": 51.5115, "longitude": -0.116,
                       "atcocode": "490000251S", "type": "bus_stop"}"#;
        let member: PlaceMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.latitude, Some(51.5115));
        assert_eq!(member.atcocode.as_deref(), Some("490000251S"));
    }

    #[test]
    fn member_with_string_coordinates() {
        let json = r#"{"name": "Aldwych", "latitude": "51.5115", "longitude": "-0.116"}"#;
        let member: PlaceMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.latitude, Some(51.5115));
        assert_eq!(member.longitude, Some(-0.116));
    }

    #[test]
    fn member_with_garbage_coordinates() {
        let json = r#"{"name": "Aldwych", "latitude": "not a number", "longitude": true}"#;
        let member: PlaceMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.latitude, None);
        assert_eq!(member.longitude, None);
    }

    #[test]
    fn empty_places_response() {
        let resp: PlacesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.into_members().is_empty());
    }

    #[test]
    fn transit_type_query_values() {
        assert_eq!(TransitType::BusStop.query_value(), "bus_stop");
        assert_eq!(TransitType::TrainStation.query_value(), "train_station");
        assert_eq!(TransitType::BusStop.to_string(), "bus_stop");
    }
}
