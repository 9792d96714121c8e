//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Earth radius used for distance calculations, in metres.
///
/// This is the WGS-84 equatorial radius; the Earth is treated as a sphere.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A validated WGS-84 position.
///
/// Both components are finite, latitude is within [-90, 90] and longitude
/// within [-180, 180]. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use er_finder::geo::Coordinate;
///
/// let seoul = Coordinate::new(37.5665, 126.978).unwrap();
/// assert_eq!(seoul.latitude(), 37.5665);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

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
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates in metres (haversine).
///
/// Symmetric, and exactly zero for identical points.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat_a, lat_b) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = lat_b - lat_a;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h marginally above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(-90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::new(95.0, 10.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate (95, 10): latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn identical_points_are_zero() {
        let p = coord(37.5, 127.0);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn seoul_to_busan() {
        // Seoul City Hall to Busan City Hall is roughly 325 km
        let seoul = coord(37.5663, 126.9779);
        let busan = coord(35.1798, 129.0750);
        let km = distance_m(seoul, busan) / 1000.0;
        assert!((320.0..330.0).contains(&km), "got {km} km");
    }

    #[test]
    fn one_degree_of_latitude() {
        let km = distance_m(coord(0.0, 0.0), coord(1.0, 0.0)) / 1000.0;
        // 2 * pi * R / 360
        assert!((km - 111.319).abs() < 0.01, "got {km} km");
    }

    #[test]
    fn antipodal_points() {
        let d = distance_m(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude":37.5,"longitude":127.0}"#).unwrap();
        assert_eq!(ok, coord(37.5, 127.0));

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude":137.5,"longitude":127.0}"#);
        assert!(bad.is_err());
    }
}
