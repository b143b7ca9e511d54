//! Coordinates and great-circle distance.
//!
//! All distances in this crate are meters. Radii, thresholds and the
//! `distance_meters` field on stops use the same unit, so call sites
//! never convert.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the Haversine formula.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated WGS84 coordinate pair, in degrees.
///
/// Latitude is within [-90, 90], longitude within [-180, 180], and both
/// are finite. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use wander_core::geo::Coordinate;
///
/// let london = Coordinate::new(51.5074, -0.1278).unwrap();
/// assert_eq!(london.latitude(), 51.5074);
///
/// // Out-of-range and non-finite inputs are rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unvalidated shape used during deserialization.
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite numbers",
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90] degrees",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180] degrees",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates, in meters.
///
/// Haversine formula on a sphere of radius 6371 km. Deterministic and
/// total: validation happens when a `Coordinate` is constructed, so this
/// function has no failure modes.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        /// Distance from a point to itself is zero.
        #[test]
        fn identity(a in any_coordinate()) {
            prop_assert_eq!(distance_meters(a, a), 0.0);
        }

        /// Distance is symmetric.
        #[test]
        fn symmetry(a in any_coordinate(), b in any_coordinate()) {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "d(a,b)={ab}, d(b,a)={ba}");
        }

        /// Distance is non-negative and bounded by half the circumference.
        #[test]
        fn bounded(a in any_coordinate(), b in any_coordinate()) {
            let d = distance_meters(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * 6_371_000.0 + 1.0);
        }

        /// Triangle inequality on the sphere, with float tolerance.
        #[test]
        fn triangle_inequality(
            a in any_coordinate(),
            b in any_coordinate(),
            c in any_coordinate(),
        ) {
            let ab = distance_meters(a, b);
            let bc = distance_meters(b, c);
            let ac = distance_meters(a, c);
            prop_assert!(ac <= ab + bc + 1e-6, "ac={ac}, ab+bc={}", ab + bc);
        }
    }
}
