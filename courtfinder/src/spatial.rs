//! Geospatial math on a spherical Earth.
//!
//! Converts physical distances to coordinate deltas and measures the
//! great-circle distance between two points. Every function here is pure and
//! total over finite inputs; non-finite inputs propagate through the
//! arithmetic unchanged.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: meters

use std::fmt;

use serde::{Deserialize, Serialize};

/// Meters spanned by one degree of latitude (constant-radius approximation).
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Floor applied to `cos(latitude)` when converting meters to longitude.
///
/// Near the poles `cos` approaches zero; the floor caps the magnification at
/// 100x the equatorial value instead of letting the result diverge.
pub const MIN_COS_LAT: f64 = 0.01;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new point from latitude and longitude in degrees.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another point in meters.
    #[inline]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_meters(*self, *other)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// Converts a north-south distance to a span of latitude degrees.
///
/// Negative input is a signed (southward) delta.
///
/// # Example
///
/// ```
/// use courtfinder::spatial::meters_to_lat_degrees;
///
/// assert_eq!(meters_to_lat_degrees(111_320.0), 1.0);
/// ```
#[inline]
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE_LAT
}

/// Converts an east-west distance to a span of longitude degrees.
///
/// Longitude circles narrow away from the equator, so the same distance
/// covers more degrees at higher latitudes. The cosine is floored at
/// [`MIN_COS_LAT`] so the result stays finite at the poles.
///
/// # Arguments
///
/// * `meters` - East-west distance in meters (signed)
/// * `at_lat` - Latitude in degrees where the distance is measured
#[inline]
pub fn meters_to_lng_degrees(meters: f64, at_lat: f64) -> f64 {
    meters / (METERS_PER_DEGREE_LAT * MIN_COS_LAT.max((at_lat * DEG_TO_RAD).cos()))
}

/// Computes the great-circle distance between two points in meters.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// The `asin` argument is clamped to 1 since rounding can push it just above
/// the domain for antipodal points.
///
/// # Example
///
/// ```
/// use courtfinder::spatial::{haversine_meters, GeoPoint};
///
/// let a = GeoPoint::new(40.7128, -74.0060);
/// assert_eq!(haversine_meters(a, a), 0.0);
/// ```
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat) * DEG_TO_RAD;
    let d_lng = (b.lng - a.lng) * DEG_TO_RAD;
    let lat1 = a.lat * DEG_TO_RAD;
    let lat2 = b.lat * DEG_TO_RAD;

    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lng = (d_lng / 2.0).sin();
    let h = sin_d_lat * sin_d_lat + lat1.cos() * lat2.cos() * sin_d_lng * sin_d_lng;

    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One degree of arc on the sphere, R * π / 180.
    const ONE_DEGREE_ARC_M: f64 = 111_194.926_644_558_74;

    #[test]
    fn test_meters_to_lat_degrees_one_degree() {
        assert_eq!(meters_to_lat_degrees(111_320.0), 1.0);
    }

    #[test]
    fn test_meters_to_lat_degrees_signed() {
        assert_eq!(meters_to_lat_degrees(-55_660.0), -0.5);
        assert_eq!(meters_to_lat_degrees(0.0), 0.0);
    }

    #[test]
    fn test_meters_to_lng_degrees_at_equator() {
        // cos(0) = 1, identical to the latitude conversion
        assert_eq!(meters_to_lng_degrees(111_320.0, 0.0), 1.0);
    }

    #[test]
    fn test_meters_to_lng_degrees_at_sixty() {
        // cos(60°) = 0.5, so a degree of longitude is half as wide
        let deg = meters_to_lng_degrees(55_660.0, 60.0);
        assert!((deg - 1.0).abs() < 1e-9, "Expected ~1.0, got {}", deg);
    }

    #[test]
    fn test_meters_to_lng_degrees_clamped_at_pole() {
        let deg = meters_to_lng_degrees(1000.0, 90.0);
        assert!(deg.is_finite());
        assert_eq!(deg, 1000.0 / (111_320.0 * 0.01));
        assert!((deg - 0.8983).abs() < 1e-3);
    }

    #[test]
    fn test_meters_to_lng_degrees_clamped_south_pole() {
        assert_eq!(
            meters_to_lng_degrees(1000.0, -90.0),
            meters_to_lng_degrees(1000.0, 90.0)
        );
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let p = GeoPoint::new(51.5074, -0.1278);
        assert_eq!(haversine_meters(p, p), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_longitude_at_equator() {
        let d = haversine_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - ONE_DEGREE_ARC_M).abs() < 1e-3, "got {}", d);
        assert!((d - 111_320.0).abs() < 200.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // A sphere has no flattening, so one degree of latitude equals one
        // degree of longitude at the equator.
        let d = haversine_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - ONE_DEGREE_ARC_M).abs() < 1e-3, "got {}", d);
    }

    #[test]
    fn test_haversine_antipodal_is_half_circumference() {
        let d = haversine_meters(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        let half = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!(d.is_finite());
        assert!((d - half).abs() < 1e-3, "got {}, expected {}", d, half);
    }

    #[test]
    fn test_haversine_pole_to_pole() {
        let d = haversine_meters(GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 45.0));
        assert!(!d.is_nan());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1e-3);
    }

    #[test]
    fn test_haversine_known_city_pair() {
        // London to Paris, ~343.5km on the sphere
        let london = GeoPoint::new(51.5074, -0.1278);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let d = haversine_meters(london, paris);
        assert!(d > 340_000.0 && d < 347_000.0, "got {}", d);
    }

    #[test]
    fn test_distance_to_delegates() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = GeoPoint::new(10.5, 9.5);
        assert_eq!(a.distance_to(&b), haversine_meters(a, b));
    }

    #[test]
    fn test_geo_point_display() {
        assert_eq!(GeoPoint::new(1.5, -2.25).to_string(), "1.500000, -2.250000");
    }

    #[test]
    fn test_nan_propagates() {
        assert!(meters_to_lat_degrees(f64::NAN).is_nan());
        let d = haversine_meters(GeoPoint::new(f64::NAN, 0.0), GeoPoint::new(0.0, 0.0));
        assert!(d.is_nan());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn point() -> impl Strategy<Value = GeoPoint> {
            (-90.0..=90.0_f64, -180.0..=180.0_f64).prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
        }

        proptest! {
            #[test]
            fn test_haversine_identity(p in point()) {
                prop_assert!(haversine_meters(p, p).abs() < 1e-6);
            }

            #[test]
            fn test_haversine_symmetric(a in point(), b in point()) {
                prop_assert_eq!(haversine_meters(a, b), haversine_meters(b, a));
            }

            #[test]
            fn test_haversine_finite_and_bounded(a in point(), b in point()) {
                let d = haversine_meters(a, b);
                prop_assert!(d.is_finite());
                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_METERS + 1e-3);
            }

            #[test]
            fn test_lng_degrees_always_finite(
                meters in -1.0e7..1.0e7_f64,
                lat in -90.0..=90.0_f64
            ) {
                let deg = meters_to_lng_degrees(meters, lat);
                prop_assert!(deg.is_finite());
                // The floor caps magnification at 1/MIN_COS_LAT
                prop_assert!(deg.abs() <= meters.abs() / (METERS_PER_DEGREE_LAT * MIN_COS_LAT) + 1e-9);
            }

            #[test]
            fn test_lng_degrees_never_smaller_than_lat_degrees(
                meters in 0.0..1.0e6_f64,
                lat in -90.0..=90.0_f64
            ) {
                prop_assert!(meters_to_lng_degrees(meters, lat) >= meters_to_lat_degrees(meters) - 1e-12);
            }
        }
    }
}
