//! Conversion from transit API DTOs to domain types.

use chrono::NaiveTime;

use crate::domain::{Arrival, Atco, Crs, TransitStop};
use crate::geo::{self, Coordinate};

use super::types::{BusLiveResponse, PlaceMember, TrainLiveResponse};

/// Convert a places-response member into a domain stop.
///
/// Returns `None` when the member has no usable coordinates; the
/// distance is computed from `center` at conversion time. A code that
/// fails validation is dropped without dropping the stop.
pub fn stop_from_member(member: &PlaceMember, center: Coordinate) -> Option<TransitStop> {
    let coordinate = Coordinate::new(member.latitude?, member.longitude?).ok()?;

    let atco_code = member
        .atcocode
        .as_deref()
        .and_then(|s| Atco::parse(s).ok());

    // The API is inconsistent about station code casing
    let crs_code = member
        .station_code
        .as_deref()
        .and_then(|s| Crs::parse(&s.to_uppercase()).ok());

    Some(TransitStop {
        name: member
            .name
            .clone()
            .unwrap_or_else(|| "Unknown stop".to_string()),
        coordinate,
        distance_meters: geo::distance_meters(center, coordinate),
        atco_code,
        crs_code,
        arrivals: Vec::new(),
    })
}

/// Flatten a live bus board into arrivals, soonest first.
pub fn bus_arrivals(response: BusLiveResponse) -> Vec<Arrival> {
    let Some(departures) = response.departures else {
        return Vec::new();
    };

    let mut arrivals: Vec<Arrival> = departures
        .into_values()
        .flatten()
        .map(|dep| {
            let time = dep
                .best_departure_estimate
                .as_deref()
                .or(dep.aimed_departure_time.as_deref())
                .and_then(parse_hhmm);

            Arrival {
                route: dep.line_name.or(dep.line).unwrap_or_default(),
                destination: dep.direction.unwrap_or_default(),
                time,
                platform: None,
            }
        })
        .collect();

    // Departures are grouped by line upstream; present them as one board
    arrivals.sort_by_key(|a| (a.time.is_none(), a.time));
    arrivals
}

/// Convert a live train board into arrivals, in board order.
pub fn train_arrivals(response: TrainLiveResponse) -> Vec<Arrival> {
    let Some(departures) = response.departures else {
        return Vec::new();
    };

    departures
        .all
        .into_iter()
        .map(|dep| {
            let time = dep
                .expected_departure_time
                .as_deref()
                .or(dep.aimed_departure_time.as_deref())
                .and_then(parse_hhmm);

            Arrival {
                route: dep.operator_name.unwrap_or_default(),
                destination: dep.destination_name.unwrap_or_default(),
                time,
                platform: dep.platform,
            }
        })
        .collect()
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Coordinate {
        Coordinate::new(51.5074, -0.1278).unwrap()
    }

    fn member(json: &str) -> PlaceMember {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn member_without_coordinates_is_dropped() {
        let m = member(r#"{"name": "Mystery stop"}"#);
        assert!(stop_from_member(&m, center()).is_none());

        let m = member(r#"{"name": "Half a stop", "latitude": 51.5}"#);
        assert!(stop_from_member(&m, center()).is_none());
    }

    #[test]
    fn member_with_out_of_range_coordinates_is_dropped() {
        let m = member(r#"{"name": "Nowhere", "latitude": 123.0, "longitude": 0.0}"#);
        assert!(stop_from_member(&m, center()).is_none());
    }

    #[test]
    fn member_distance_is_computed() {
        let m = member(r#"{"name": "Nearby", "latitude": 51.5080, "longitude": -0.1275}"#);
        let stop = stop_from_member(&m, center()).unwrap();
        assert!(
            (65.0..75.0).contains(&stop.distance_meters),
            "got {}",
            stop.distance_meters
        );
    }

    #[test]
    fn member_codes_are_validated_not_fatal() {
        let m = member(
            r#"{"name": "S", "latitude": 51.5, "longitude": -0.1,
                "atcocode": "490000251S", "station_code": "vic"}"#,
        );
        let stop = stop_from_member(&m, center()).unwrap();
        assert_eq!(stop.atco_code.unwrap().as_str(), "490000251S");
        // lowercase station code is uppercased before validation
        assert_eq!(stop.crs_code.unwrap().as_str(), "VIC");

        let m = member(
            r#"{"name": "S", "latitude": 51.5, "longitude": -0.1,
                "atcocode": "bad!", "station_code": "TOOLONG"}"#,
        );
        let stop = stop_from_member(&m, center()).unwrap();
        assert!(stop.atco_code.is_none());
        assert!(stop.crs_code.is_none());
    }

    #[test]
    fn bus_board_flattens_and_sorts() {
        let json = r#"{"departures": {
            "73": [
                {"line_name": "73", "direction": "Stoke Newington",
                 "aimed_departure_time": "22:40"},
                {"line_name": "73", "direction": "Stoke Newington",
                 "aimed_departure_time": "22:10",
                 "best_departure_estimate": "22:15"}
            ],
            "390": [
                {"line": "390", "direction": "Archway",
                 "aimed_departure_time": "22:05"}
            ]
        }}"#;

        let arrivals = bus_arrivals(serde_json::from_str(json).unwrap());
        assert_eq!(arrivals.len(), 3);
        assert_eq!(arrivals[0].route, "390");
        assert_eq!(arrivals[1].time, NaiveTime::from_hms_opt(22, 15, 0));
        assert_eq!(arrivals[2].time, NaiveTime::from_hms_opt(22, 40, 0));
    }

    #[test]
    fn bus_board_without_departures_is_empty() {
        let arrivals = bus_arrivals(serde_json::from_str("{}").unwrap());
        assert!(arrivals.is_empty());
    }

    #[test]
    fn train_board_keeps_order_and_platform() {
        let json = r#"{"departures": {"all": [
            {"operator_name": "Southern", "destination_name": "Brighton",
             "platform": "14", "aimed_departure_time": "09:32"},
            {"operator_name": "Thameslink", "destination_name": "Bedford",
             "expected_departure_time": "09:41"}
        ]}}"#;

        let arrivals = train_arrivals(serde_json::from_str(json).unwrap());
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].destination, "Brighton");
        assert_eq!(arrivals[0].platform.as_deref(), Some("14"));
        assert_eq!(arrivals[1].time, NaiveTime::from_hms_opt(9, 41, 0));
    }

    #[test]
    fn unparseable_times_become_none() {
        let json = r#"{"departures": {"all": [
            {"destination_name": "Brighton", "aimed_departure_time": "soon"}
        ]}}"#;

        let arrivals = train_arrivals(serde_json::from_str(json).unwrap());
        assert_eq!(arrivals[0].time, None);
    }
}
