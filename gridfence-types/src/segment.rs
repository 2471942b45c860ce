//! Directed line segments and the segment intersection test.

use serde::{Deserialize, Serialize};

use crate::point::GeoPoint;
use crate::rect::GeoRect;
use crate::{FLOAT_TOLERANCE, earth};

/// A directed line segment from `a` to `b`.
///
/// A segment is degenerate when `a == b`; every algorithm here special-cases
/// that before any division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSegment {
    pub a: GeoPoint,
    pub b: GeoPoint,
}

/// Result of [`GeoSegment::intersection`].
///
/// For collinear overlapping segments both `is_parallel` and `intersects`
/// are true and `point` holds an arbitrary point of the overlap (the other
/// segment's first endpoint); callers must rely on the flags only, not on
/// the exact position, in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub point: Option<GeoPoint>,
    pub is_parallel: bool,
    pub intersects: bool,
}

impl Intersection {
    const MISS: Intersection = Intersection {
        point: None,
        is_parallel: false,
        intersects: false,
    };

    fn hit(point: GeoPoint) -> Self {
        Intersection {
            point: Some(point),
            is_parallel: false,
            intersects: true,
        }
    }
}

impl GeoSegment {
    #[inline]
    pub fn new(a: GeoPoint, b: GeoPoint) -> Self {
        Self { a, b }
    }

    /// Great-circle length in meters.
    pub fn length(&self) -> f64 {
        earth::distance(self.a, self.b)
    }

    /// Whether both endpoints coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// Axis-aligned bounding rectangle of the two endpoints.
    pub fn bounds(&self) -> GeoRect {
        GeoRect::new(
            self.a.lat.min(self.b.lat),
            self.a.lng.min(self.b.lng),
            self.a.lat.max(self.b.lat),
            self.a.lng.max(self.b.lng),
        )
    }

    /// Whether `p` lies on this segment.
    ///
    /// The point must fall inside the segment's bounding rectangle and the
    /// cross product of `p - a` with the segment direction must be within
    /// [`FLOAT_TOLERANCE`] of zero.
    pub fn contains_point(&self, p: GeoPoint) -> bool {
        if !self.bounds().contains(p) {
            return false;
        }
        if p == self.a || p == self.b {
            return true;
        }
        let dir = vector_difference(self.a, self.b);
        let offset = vector_difference(p, self.a);
        cross_product(dir, offset).abs() < FLOAT_TOLERANCE
    }

    /// Parametric segment intersection (`p + t·r = q + u·s`).
    ///
    /// Zero-length segments degrade to point-on-segment tests. For skew
    /// intersections, `t` and `u` must both lie in `[0, 1]`; when the two
    /// independently computed hit points disagree by rounding, the reported
    /// point is their great-circle midpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridfence_types::{GeoPoint, GeoSegment};
    ///
    /// let shared = GeoPoint::new(1.0, 1.0);
    /// let s1 = GeoSegment::new(GeoPoint::new(0.0, 0.0), shared);
    /// let s2 = GeoSegment::new(shared, GeoPoint::new(0.0, 2.0));
    /// let x = s1.intersection(&s2);
    /// assert!(x.intersects);
    /// assert_eq!(x.point, Some(shared));
    /// ```
    pub fn intersection(&self, other: &GeoSegment) -> Intersection {
        if self.is_degenerate() {
            return if other.contains_point(self.a) {
                Intersection::hit(self.a)
            } else {
                Intersection::MISS
            };
        }
        if other.is_degenerate() {
            return if self.contains_point(other.a) {
                Intersection::hit(other.a)
            } else {
                Intersection::MISS
            };
        }

        let r = vector_difference(self.b, self.a);
        let s = vector_difference(other.b, other.a);
        let r_cross_s = cross_product(r, s);
        let offset = vector_difference(other.a, self.a);

        if r_cross_s == 0.0 {
            // Collinear when the offset is also parallel to the direction;
            // otherwise parallel and disjoint.
            if cross_product(offset, r) == 0.0 {
                return Intersection {
                    point: Some(other.a),
                    is_parallel: true,
                    intersects: true,
                };
            }
            return Intersection {
                point: None,
                is_parallel: true,
                intersects: false,
            };
        }

        let t = cross_product(offset, s) / r_cross_s;
        let u = cross_product(offset, r) / r_cross_s;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            let from_self = GeoPoint::new(self.a.lat + t * r.lat, self.a.lng + t * r.lng);
            let from_other = GeoPoint::new(other.a.lat + u * s.lat, other.a.lng + u * s.lng);
            let point = if from_self == from_other {
                from_self
            } else {
                earth::mid_point(from_self, from_other)
            };
            return Intersection::hit(point);
        }
        Intersection::MISS
    }
}

impl std::fmt::Display for GeoSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Component-wise difference `p1 - p2`, treated as a 2D vector.
#[inline]
pub(crate) fn vector_difference(p1: GeoPoint, p2: GeoPoint) -> GeoPoint {
    GeoPoint::new(p1.lat - p2.lat, p1.lng - p2.lng)
}

/// 2D cross product of two vectors.
#[inline]
pub(crate) fn cross_product(p1: GeoPoint, p2: GeoPoint) -> f64 {
    p1.lat * p2.lng - p1.lng * p2.lat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64) -> GeoSegment {
        GeoSegment::new(GeoPoint::new(a_lat, a_lng), GeoPoint::new(b_lat, b_lng))
    }

    #[test]
    fn test_skew_crossing() {
        let s1 = seg(0.0, 0.0, 2.0, 2.0);
        let s2 = seg(2.0, 0.0, 0.0, 2.0);
        let x = s1.intersection(&s2);
        assert!(x.intersects);
        assert!(!x.is_parallel);
        let p = x.point.expect("crossing must report a point");
        assert!((p.lat - 1.0).abs() < 1e-9);
        assert!((p.lng - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_endpoint_reports_that_point() {
        let shared = GeoPoint::new(39.95, 116.35);
        let s1 = seg(39.90, 116.30, 39.95, 116.35);
        let s2 = GeoSegment::new(shared, GeoPoint::new(39.90, 116.40));
        let x = s1.intersection(&s2);
        assert!(x.intersects);
        assert!(!x.is_parallel);
        assert_eq!(x.point, Some(shared));
    }

    #[test]
    fn test_parallel_horizontal_segments() {
        let s1 = seg(39.90, 116.30, 39.90, 116.40);
        let s2 = seg(39.95, 116.30, 39.95, 116.40);
        let x = s1.intersection(&s2);
        assert!(x.is_parallel);
        assert!(!x.intersects);
        assert_eq!(x.point, None);
    }

    #[test]
    fn test_collinear_overlap_reports_both_flags() {
        let s1 = seg(0.0, 0.0, 0.0, 10.0);
        let s2 = seg(0.0, 5.0, 0.0, 15.0);
        let x = s1.intersection(&s2);
        assert!(x.is_parallel);
        assert!(x.intersects);
        // Arbitrary overlap point: the other segment's first endpoint.
        assert_eq!(x.point, Some(GeoPoint::new(0.0, 5.0)));
    }

    #[test]
    fn test_zero_length_segment_on_other() {
        let dot = seg(0.0, 5.0, 0.0, 5.0);
        let line = seg(0.0, 0.0, 0.0, 10.0);
        let x = dot.intersection(&line);
        assert!(x.intersects);
        assert_eq!(x.point, Some(GeoPoint::new(0.0, 5.0)));

        let x = line.intersection(&dot);
        assert!(x.intersects);
        assert_eq!(x.point, Some(GeoPoint::new(0.0, 5.0)));

        let far_dot = seg(1.0, 5.0, 1.0, 5.0);
        assert!(!line.intersection(&far_dot).intersects);
    }

    #[test]
    fn test_disjoint_skew_segments() {
        let s1 = seg(0.0, 0.0, 1.0, 1.0);
        let s2 = seg(3.0, 0.0, 4.0, 1.0);
        let x = s1.intersection(&s2);
        assert!(!x.intersects);
        assert!(!x.is_parallel);
    }

    #[test]
    fn test_contains_point() {
        let s = seg(0.0, 0.0, 0.0, 10.0);
        assert!(s.contains_point(GeoPoint::new(0.0, 5.0)));
        assert!(s.contains_point(GeoPoint::new(0.0, 0.0)));
        assert!(s.contains_point(GeoPoint::new(0.0, 10.0)));
        assert!(!s.contains_point(GeoPoint::new(0.1, 5.0)));
        assert!(!s.contains_point(GeoPoint::new(0.0, 10.1)));

        let diag = seg(0.0, 0.0, 10.0, 10.0);
        assert!(diag.contains_point(GeoPoint::new(5.0, 5.0)));
        assert!(!diag.contains_point(GeoPoint::new(5.0, 5.1)));
    }

    #[test]
    fn test_length_and_bounds() {
        let s = seg(39.95, 116.40, 39.90, 116.30);
        assert!(s.length() > 0.0);
        let b = s.bounds();
        assert_eq!(b.min_lat, 39.90);
        assert_eq!(b.max_lat, 39.95);
        assert_eq!(b.min_lng, 116.30);
        assert_eq!(b.max_lng, 116.40);
    }
}
