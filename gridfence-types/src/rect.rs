//! Axis-aligned geographic rectangles.

use serde::{Deserialize, Serialize};

use crate::earth;
use crate::point::GeoPoint;
use crate::segment::GeoSegment;

/// An axis-aligned rectangle in lat/lng space.
///
/// Invariant: `min_lat <= max_lat` and `min_lng <= max_lng`. Geohash cells
/// decode to this type, and polygons report their bounding box as one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl GeoRect {
    #[inline]
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
        }
    }

    /// Longitude span in degrees.
    #[inline]
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Latitude span in degrees.
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Whether `p` lies in the rectangle, boundary included.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat <= self.max_lat && p.lat >= self.min_lat && p.lng >= self.min_lng && p.lng <= self.max_lng
    }

    /// Whether `p` lies strictly inside the rectangle, boundary excluded.
    #[inline]
    pub fn contains_strict(&self, p: GeoPoint) -> bool {
        p.lat < self.max_lat && p.lat > self.min_lat && p.lng > self.min_lng && p.lng < self.max_lng
    }

    /// Great-circle midpoint of the two extreme corners.
    pub fn mid_point(&self) -> GeoPoint {
        earth::mid_point(
            GeoPoint::new(self.max_lat, self.max_lng),
            GeoPoint::new(self.min_lat, self.min_lng),
        )
    }

    /// Width in meters, measured along the southern edge.
    pub fn width(&self) -> f64 {
        earth::distance(
            GeoPoint::new(self.min_lat, self.max_lng),
            GeoPoint::new(self.min_lat, self.min_lng),
        )
    }

    /// Height in meters, measured along the eastern edge.
    pub fn height(&self) -> f64 {
        earth::distance(
            GeoPoint::new(self.max_lat, self.max_lng),
            GeoPoint::new(self.min_lat, self.max_lng),
        )
    }

    #[inline]
    pub fn left_bottom(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.min_lng)
    }

    #[inline]
    pub fn left_up(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.min_lng)
    }

    #[inline]
    pub fn right_up(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.max_lng)
    }

    #[inline]
    pub fn right_bottom(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.max_lng)
    }

    /// Western border, directed top-down.
    pub fn left_border(&self) -> GeoSegment {
        GeoSegment::new(self.left_up(), self.left_bottom())
    }

    /// Eastern border, directed top-down.
    pub fn right_border(&self) -> GeoSegment {
        GeoSegment::new(self.right_up(), self.right_bottom())
    }

    /// Northern border, directed left-right.
    pub fn top_border(&self) -> GeoSegment {
        GeoSegment::new(self.left_up(), self.right_up())
    }

    /// Southern border, directed left-right.
    pub fn bottom_border(&self) -> GeoSegment {
        GeoSegment::new(self.left_bottom(), self.right_bottom())
    }

    /// Diagonal from the top-left corner down to the bottom-right corner.
    pub fn diagonal_down(&self) -> GeoSegment {
        GeoSegment::new(self.left_up(), self.right_bottom())
    }

    /// Diagonal from the bottom-left corner up to the top-right corner.
    pub fn diagonal_up(&self) -> GeoSegment {
        GeoSegment::new(self.left_bottom(), self.right_up())
    }

    /// The four corners, bottom-left first, then bottom-right, top-right,
    /// top-left.
    pub fn vertices(&self) -> [GeoPoint; 4] {
        [
            self.left_bottom(),
            self.right_bottom(),
            self.right_up(),
            self.left_up(),
        ]
    }

    /// The four border segments, connecting [`GeoRect::vertices`] in order
    /// and closing back to the first.
    pub fn borders(&self) -> [GeoSegment; 4] {
        let v = self.vertices();
        [
            GeoSegment::new(v[0], v[1]),
            GeoSegment::new(v[1], v[2]),
            GeoSegment::new(v[2], v[3]),
            GeoSegment::new(v[3], v[0]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> GeoRect {
        GeoRect::new(39.90, 116.30, 39.95, 116.40)
    }

    #[test]
    fn test_containment_inclusive_vs_strict() {
        let r = rect();
        let interior = GeoPoint::new(39.92, 116.35);
        let on_edge = GeoPoint::new(39.90, 116.35);
        let corner = GeoPoint::new(39.95, 116.40);
        let outside = GeoPoint::new(39.96, 116.35);

        assert!(r.contains(interior));
        assert!(r.contains(on_edge));
        assert!(r.contains(corner));
        assert!(!r.contains(outside));

        assert!(r.contains_strict(interior));
        assert!(!r.contains_strict(on_edge));
        assert!(!r.contains_strict(corner));
    }

    #[test]
    fn test_vertices_and_borders_are_closed() {
        let r = rect();
        let v = r.vertices();
        assert_eq!(v[0], GeoPoint::new(39.90, 116.30));
        assert_eq!(v[1], GeoPoint::new(39.90, 116.40));
        assert_eq!(v[2], GeoPoint::new(39.95, 116.40));
        assert_eq!(v[3], GeoPoint::new(39.95, 116.30));

        let borders = r.borders();
        for i in 0..4 {
            assert_eq!(borders[i].b, borders[(i + 1) % 4].a);
        }
    }

    #[test]
    fn test_directed_borders() {
        let r = rect();
        assert_eq!(r.left_border().a, r.left_up());
        assert_eq!(r.left_border().b, r.left_bottom());
        assert_eq!(r.top_border().a, r.left_up());
        assert_eq!(r.top_border().b, r.right_up());
    }

    #[test]
    fn test_diagonals_cross_in_the_middle() {
        let r = rect();
        let x = r.diagonal_down().intersection(&r.diagonal_up());
        assert!(x.intersects);
        let p = x.point.expect("diagonals must cross");
        assert!(r.contains_strict(p));
    }

    #[test]
    fn test_width_height_meters() {
        let r = rect();
        // ~0.1 degree of longitude at ~40N is ~8.5km; 0.05 degree of
        // latitude is ~5.6km.
        assert!((r.width() - 8_500.0).abs() < 500.0, "width {}", r.width());
        assert!((r.height() - 5_560.0).abs() < 300.0, "height {}", r.height());
    }

    #[test]
    fn test_mid_point_is_inside() {
        let r = rect();
        assert!(r.contains_strict(r.mid_point()));
    }
}
