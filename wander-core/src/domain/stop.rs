//! Transit stops and live arrivals.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

use super::codes::{Atco, Crs};

/// A bus stop or train station near a reference point.
///
/// `distance_meters` is derived at query time from the reference
/// coordinate of the lookup that produced this stop; it is not
/// authoritative and is persisted only as part of a `Place` snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStop {
    /// Human-readable stop or station name.
    pub name: String,

    /// Location of the stop.
    pub coordinate: Coordinate,

    /// Meters from the query's reference point.
    pub distance_meters: f64,

    /// ATCO code, present for bus stops. Needed for live departure lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atco_code: Option<Atco>,

    /// CRS code, present for train stations. Needed for live departure lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs_code: Option<Crs>,

    /// Live arrivals, when a departure board has been fetched for this stop.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arrivals: Vec<Arrival>,
}

/// One entry on a live departure board. Purely descriptive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    /// Route or service identifier ("73", "Elizabeth Line").
    pub route: String,

    /// Where the service is headed.
    pub destination: String,

    /// Scheduled or estimated time, when the board provides one we can parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,

    /// Platform, for train stations that announce one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> TransitStop {
        TransitStop {
            name: "Aldwych / Somerset House".to_string(),
            coordinate: Coordinate::new(51.5115, -0.1160).unwrap(),
            distance_meters: 412.7,
            atco_code: Some(Atco::parse("490000251S").unwrap()),
            crs_code: None,
            arrivals: vec![Arrival {
                route: "6".to_string(),
                destination: "Aldwych".to_string(),
                time: NaiveTime::from_hms_opt(22, 30, 0),
                platform: None,
            }],
        }
    }

    #[test]
    fn serde_roundtrip() {
        let original = stop();
        let json = serde_json::to_string(&original).unwrap();
        let back: TransitStop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn optional_fields_are_omitted() {
        let mut s = stop();
        s.atco_code = None;
        s.arrivals.clear();

        let json = serde_json::to_string(&s).unwrap();
        assert!(!json.contains("atco_code"));
        assert!(!json.contains("crs_code"));
        assert!(!json.contains("arrivals"));
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "name": "Charing Cross",
            "coordinate": {"latitude": 51.5081, "longitude": -0.1248},
            "distance_meters": 95.0
        }"#;

        let s: TransitStop = serde_json::from_str(json).unwrap();
        assert_eq!(s.name, "Charing Cross");
        assert!(s.atco_code.is_none());
        assert!(s.arrivals.is_empty());
    }
}
