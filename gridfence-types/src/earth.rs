//! Great-circle math on a spherical earth.
//!
//! All functions take and return degrees; distances are in meters. The
//! spherical model (WGS84 equatorial radius) is accurate to well under 1%
//! for the city-scale shapes the rasterizer works with.

use crate::point::GeoPoint;

/// Earth radius in meters (WGS84 equatorial).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Great-circle distance between two points, in meters.
///
/// Returns exactly `0.0` when the points are equal: the law-of-cosines
/// formula is numerically unstable near zero distance, where the cosine
/// argument can round past 1.0 and `acos` would produce NaN.
///
/// # Examples
///
/// ```
/// use gridfence_types::{GeoPoint, earth};
///
/// let nyc = GeoPoint::new(40.7128, -74.0060);
/// let la = GeoPoint::new(34.0522, -118.2437);
/// let d = earth::distance(nyc, la);
/// assert!(d > 3_900_000.0 && d < 4_000_000.0);
/// assert_eq!(earth::distance(nyc, nyc), 0.0);
/// ```
pub fn distance(p1: GeoPoint, p2: GeoPoint) -> f64 {
    if p1 == p2 {
        return 0.0;
    }
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let theta = (p2.lng - p1.lng).to_radians();
    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();
    // Rounding can still push the argument past ±1 for near-identical points.
    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS
}

/// Great-circle midpoint of two points. Returns `p2` when the points are
/// equal.
pub fn mid_point(p1: GeoPoint, p2: GeoPoint) -> GeoPoint {
    if p1 == p2 {
        return p2;
    }
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let lng1 = p1.lng.to_radians();
    let diff_lng = (p2.lng - p1.lng).to_radians();

    let bx = lat2.cos() * diff_lng.cos();
    let by = lat2.cos() * diff_lng.sin();

    let lat3 = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
    let lng3 = lng1 + by.atan2(lat1.cos() + bx);

    GeoPoint::new(lat3.to_degrees(), lng3.to_degrees())
}

/// The point reached by travelling `distance_meters` from `point` along an
/// initial bearing of `bearing_degrees` (clockwise from north).
///
/// Returns the input unchanged when the distance is zero or negative. The
/// resulting longitude is normalized into (-180, 180].
pub fn point_at_dist_and_bearing(
    point: GeoPoint,
    distance_meters: f64,
    bearing_degrees: f64,
) -> GeoPoint {
    if distance_meters <= 0.0 {
        return point;
    }
    let dr = distance_meters / EARTH_RADIUS;
    let bearing = bearing_degrees.to_radians();
    let lat1 = point.lat.to_radians();
    let lng1 = point.lng.to_radians();

    let lat2 = (lat1.sin() * dr.cos() + lat1.cos() * dr.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * dr.sin() * lat1.cos()).atan2(dr.cos() - lat1.sin() * lat2.sin());
    let lng2 = (lng2 + 3.0 * std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI)
        - std::f64::consts::PI;

    GeoPoint::new(lat2.to_degrees(), lng2.to_degrees())
}
