//! Geographic points in double-precision degrees.

use serde::{Deserialize, Serialize};

use crate::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, earth};

/// A geographic point as (latitude, longitude) in degrees.
///
/// Points outside the valid lat/lng range are representable; validity is a
/// predicate ([`GeoPoint::is_valid`]) checked by consuming operations, not an
/// invariant enforced at construction.
///
/// # Examples
///
/// ```
/// use gridfence_types::GeoPoint;
///
/// let forbidden_city = GeoPoint::new(39.928, 116.389);
/// assert!(forbidden_city.is_valid());
/// assert!(!GeoPoint::new(95.0, 116.389).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the coordinates lie in the valid lat/lng domain.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng)
    }

    /// The point as a `[lat, lng]` pair.
    #[inline]
    pub fn as_array(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Project this point by a distance (meters) along an initial bearing
    /// (degrees clockwise from north). See [`earth::point_at_dist_and_bearing`].
    pub fn at_dist_and_bearing(&self, distance_meters: f64, bearing_degrees: f64) -> GeoPoint {
        earth::point_at_dist_and_bearing(*self, distance_meters, bearing_degrees)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_range() {
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(GeoPoint::new(90.0, 180.0).is_valid());
        assert!(GeoPoint::new(-90.0, -180.0).is_valid());

        assert!(!GeoPoint::new(90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(-90.1, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.1).is_valid());
        assert!(!GeoPoint::new(0.0, -180.1).is_valid());
    }

    #[test]
    fn test_display_and_array() {
        let p = GeoPoint::new(39.928, 116.389);
        assert_eq!(p.to_string(), "39.928,116.389");
        assert_eq!(p.as_array(), [39.928, 116.389]);
    }

    #[test]
    fn test_equality_is_exact() {
        let p = GeoPoint::new(39.928, 116.389);
        assert_eq!(p, GeoPoint::new(39.928, 116.389));
        assert_ne!(p, GeoPoint::new(39.928, 116.3890000001));
    }
}
