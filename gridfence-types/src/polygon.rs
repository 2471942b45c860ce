//! Simple polygons over an ordered vertex ring, with memoized derived data.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::point::GeoPoint;
use crate::rect::GeoRect;
use crate::segment::GeoSegment;
use crate::{
    FLOAT_TOLERANCE, MAX_LATITUDE, MAX_LONGITUDE, MAX_POLYGON_SPAN_METERS, MIN_LATITUDE,
    MIN_LONGITUDE,
};

/// A simple polygon given as an ordered ring of vertices.
///
/// The ring is implicitly closed: when constructed from three or more
/// vertices whose first and last points differ, the first vertex is appended
/// again. The border list and bounding rectangle are computed once on first
/// use and cached; [`GeoPolygon::add_point`] invalidates both caches.
///
/// Validity ([`GeoPolygon::is_valid`]) requires at least 3 vertices and a
/// bounding box under 100 km on both axes. Invalid polygons are not rejected
/// at construction; consuming operations fail soft (empty results) instead,
/// so batch rasterization never aborts on one bad shape.
///
/// # Examples
///
/// ```
/// use gridfence_types::{GeoPoint, GeoPolygon};
///
/// let polygon = GeoPolygon::new(vec![
///     GeoPoint::new(39.90, 116.30),
///     GeoPoint::new(39.95, 116.30),
///     GeoPoint::new(39.95, 116.40),
///     GeoPoint::new(39.90, 116.40),
/// ]);
/// assert!(polygon.is_valid());
/// assert!(polygon.contains_point(GeoPoint::new(39.92, 116.35)));
/// assert!(!polygon.contains_point(GeoPoint::new(39.80, 116.35)));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPolygon {
    points: Vec<GeoPoint>,
    #[serde(skip)]
    borders: OnceCell<Vec<GeoSegment>>,
    #[serde(skip)]
    bounds: OnceCell<GeoRect>,
}

impl PartialEq for GeoPolygon {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl GeoPolygon {
    /// Build a polygon from an ordered ring, closing it if needed.
    pub fn new(mut points: Vec<GeoPoint>) -> Self {
        if points.len() >= 3 && points.first() != points.last() {
            points.push(points[0]);
        }
        Self {
            points,
            borders: OnceCell::new(),
            bounds: OnceCell::new(),
        }
    }

    /// The vertex ring, including the closing duplicate of the first vertex.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Append a vertex, invalidating the memoized borders and bounds.
    pub fn add_point(&mut self, p: GeoPoint) {
        self.points.push(p);
        self.borders.take();
        self.bounds.take();
    }

    /// Every vertex formatted as `"lat,lng"`, in ring order.
    pub fn formatted_points(&self) -> Vec<String> {
        self.points.iter().map(GeoPoint::to_string).collect()
    }

    /// At least 3 vertices and a bounding box under the 100 km span limit on
    /// both axes.
    pub fn is_valid(&self) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let rect = self.bounds();
        rect.width() < MAX_POLYGON_SPAN_METERS && rect.height() < MAX_POLYGON_SPAN_METERS
    }

    /// Bounding rectangle over all vertices, memoized.
    pub fn bounds(&self) -> GeoRect {
        *self.bounds.get_or_init(|| {
            let mut max_lat = MIN_LATITUDE;
            let mut max_lng = MIN_LONGITUDE;
            let mut min_lat = MAX_LATITUDE;
            let mut min_lng = MAX_LONGITUDE;
            for p in &self.points {
                max_lat = max_lat.max(p.lat);
                min_lat = min_lat.min(p.lat);
                max_lng = max_lng.max(p.lng);
                min_lng = min_lng.min(p.lng);
            }
            GeoRect::new(min_lat, min_lng, max_lat, max_lng)
        })
    }

    /// Border segments between consecutive vertices plus the closing edge,
    /// memoized. Empty for invalid polygons.
    ///
    /// When the ring is already closed the trailing closing edge is
    /// degenerate; the intersection routines special-case zero-length
    /// segments, so it is harmless there and load-bearing for rings mutated
    /// open via [`GeoPolygon::add_point`].
    pub fn borders(&self) -> &[GeoSegment] {
        if !self.is_valid() {
            return &[];
        }
        self.borders.get_or_init(|| {
            let mut ret = Vec::with_capacity(self.points.len());
            let mut prev = self.points[0];
            for &p in &self.points[1..] {
                ret.push(GeoSegment::new(prev, p));
                prev = p;
            }
            ret.push(GeoSegment::new(
                self.points[self.points.len() - 1],
                self.points[0],
            ));
            ret
        })
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// Casts an eastward ray from `p` and counts border crossings; odd
    /// parity means inside. Horizontal and vertical edges are handled
    /// directly rather than through the x-intercept formula, a point within
    /// tolerance of an edge reports inside immediately, and a ray grazing a
    /// vertex looks ahead to the next non-duplicate vertex to decide between
    /// one crossing (straddle) and two (graze). Returns `false` for invalid
    /// points or polygons.
    pub fn contains_point(&self, p: GeoPoint) -> bool {
        if !p.is_valid() || !self.is_valid() {
            return false;
        }
        if !self.bounds().contains(p) {
            return false;
        }
        // A point sitting exactly on a vertex is always inside.
        if self.points.contains(&p) {
            return true;
        }

        let points = &self.points;
        let n = points.len();
        let mut crossings = 0u32;
        let mut p1 = points[0];

        for i in 1..n {
            let p2 = points[i];
            if p.lat < p1.lat.min(p2.lat) || p.lat > p1.lat.max(p2.lat) {
                p1 = p2;
                continue;
            }
            if p.lat > p1.lat.min(p2.lat) && p.lat < p1.lat.max(p2.lat) {
                // Strict straddle: the ray can only cross east of p.
                if p.lng <= p1.lng.max(p2.lng) {
                    if p1.lat == p2.lat && p.lng >= p1.lng.min(p2.lng) {
                        return true;
                    }
                    if p1.lng == p2.lng {
                        if p1.lng == p.lng {
                            return true;
                        }
                        crossings += 1;
                    } else {
                        let x_intercept =
                            (p.lat - p1.lat) * (p2.lng - p1.lng) / (p2.lat - p1.lat) + p1.lng;
                        if (p.lng - x_intercept).abs() < FLOAT_TOLERANCE {
                            return true;
                        }
                        if p.lng < x_intercept {
                            crossings += 1;
                        }
                    }
                }
            } else if p.lat == p2.lat && p.lng <= p2.lng {
                // Boundary touch at a vertex: look ahead past duplicate
                // vertices to decide graze (2 crossings) vs straddle (1).
                let mut p3 = points[(i + 1) % n];
                if p3 == p2 {
                    p3 = points[(i + 2) % n];
                }
                if p.lat >= p1.lat.min(p3.lat) && p.lat <= p1.lat.max(p3.lat) {
                    crossings += 1;
                } else {
                    crossings += 2;
                }
            }
            p1 = p2;
        }

        crossings % 2 == 1
    }

    /// Whether any two non-adjacent borders (sharing no endpoint) intersect.
    ///
    /// Used to validate generated test shapes; the rasterizer assumes simple
    /// polygons and never calls this.
    pub fn has_self_intersecting_borders(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        let borders = self.borders();
        for (i, b1) in borders.iter().enumerate() {
            for b2 in borders.iter().skip(i + 1) {
                if b1.a == b2.a || b1.a == b2.b || b1.b == b2.a || b1.b == b2.b {
                    continue;
                }
                if b1.intersection(b2).intersects {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> GeoPolygon {
        GeoPolygon::new(vec![
            GeoPoint::new(39.90, 116.30),
            GeoPoint::new(39.95, 116.30),
            GeoPoint::new(39.95, 116.40),
            GeoPoint::new(39.90, 116.40),
        ])
    }

    #[test]
    fn test_ring_is_closed_on_construction() {
        let p = square();
        assert_eq!(p.points().len(), 5);
        assert_eq!(p.points().first(), p.points().last());

        // Already closed rings are left alone.
        let closed = GeoPolygon::new(p.points().to_vec());
        assert_eq!(closed.points().len(), 5);
    }

    #[test]
    fn test_validity() {
        assert!(square().is_valid());

        let too_few = GeoPolygon::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        assert!(!too_few.is_valid());

        // 2 degrees of latitude is far beyond the 100 km span limit.
        let too_large = GeoPolygon::new(vec![
            GeoPoint::new(39.0, 116.0),
            GeoPoint::new(41.0, 116.0),
            GeoPoint::new(41.0, 118.0),
            GeoPoint::new(39.0, 118.0),
        ]);
        assert!(!too_large.is_valid());
        assert!(too_large.borders().is_empty());
        assert!(!too_large.contains_point(GeoPoint::new(40.0, 117.0)));
    }

    #[test]
    fn test_bounds() {
        let b = square().bounds();
        assert_eq!(b, GeoRect::new(39.90, 116.30, 39.95, 116.40));
    }

    #[test]
    fn test_borders_connect_the_ring() {
        let p = square();
        let borders = p.borders();
        assert_eq!(borders.len(), 5);
        for w in borders.windows(2) {
            assert_eq!(w[0].b, w[1].a);
        }
        // Closed ring: the trailing closing edge is degenerate.
        assert!(borders[4].is_degenerate());
    }

    #[test]
    fn test_add_point_invalidates_caches() {
        let mut p = square();
        let before = p.bounds();
        assert_eq!(p.borders().len(), 5);

        p.add_point(GeoPoint::new(39.85, 116.35));
        let after = p.bounds();
        assert!(after.min_lat < before.min_lat);
        assert_eq!(p.borders().len(), 6);
    }

    #[test]
    fn test_every_vertex_is_contained() {
        let p = GeoPolygon::new(vec![
            GeoPoint::new(39.993252, 116.385297),
            GeoPoint::new(39.974235, 116.325505),
            GeoPoint::new(39.931314, 116.290435),
            GeoPoint::new(39.879508, 116.346777),
            GeoPoint::new(39.911836, 116.436464),
            GeoPoint::new(39.93751, 116.451987),
            GeoPoint::new(39.971138, 116.449687),
            GeoPoint::new(39.994579, 116.415767),
        ]);
        for &v in p.points() {
            assert!(p.contains_point(v), "vertex {} must be inside", v);
        }
    }

    #[test]
    fn test_points_on_edges() {
        let p = square();
        // On the horizontal bottom edge.
        assert!(p.contains_point(GeoPoint::new(39.90, 116.35)));
        // On the vertical left edge.
        assert!(p.contains_point(GeoPoint::new(39.92, 116.30)));
        // Just outside the left edge.
        assert!(!p.contains_point(GeoPoint::new(39.92, 116.29999)));
    }

    #[test]
    fn test_concave_polygon_notch() {
        // Arrow-like shape with a notch pointing into it from the east.
        let p = GeoPolygon::new(vec![
            GeoPoint::new(39.90, 116.30),
            GeoPoint::new(39.96, 116.30),
            GeoPoint::new(39.96, 116.40),
            GeoPoint::new(39.93, 116.34),
            GeoPoint::new(39.90, 116.40),
        ]);
        assert!(p.contains_point(GeoPoint::new(39.93, 116.32)));
        // In the notch: inside the bounding box but outside the polygon.
        assert!(!p.contains_point(GeoPoint::new(39.93, 116.38)));
    }

    #[test]
    fn test_ray_through_vertex_parity() {
        // Diamond: an eastward ray through the west vertex grazes it.
        let p = GeoPolygon::new(vec![
            GeoPoint::new(39.95, 116.35),
            GeoPoint::new(39.90, 116.40),
            GeoPoint::new(39.85, 116.35),
            GeoPoint::new(39.90, 116.30),
        ]);
        // Same latitude as the west and east vertices, inside.
        assert!(p.contains_point(GeoPoint::new(39.90, 116.35)));
        // Same latitude, west of the polygon.
        assert!(!p.contains_point(GeoPoint::new(39.90, 116.20)));
        // Above the north vertex.
        assert!(!p.contains_point(GeoPoint::new(39.97, 116.35)));
    }

    #[test]
    fn test_self_intersection() {
        // Bowtie: two crossing borders that share no endpoint.
        let bowtie = GeoPolygon::new(vec![
            GeoPoint::new(39.90, 116.30),
            GeoPoint::new(39.95, 116.40),
            GeoPoint::new(39.95, 116.30),
            GeoPoint::new(39.90, 116.40),
        ]);
        assert!(bowtie.has_self_intersecting_borders());
        assert!(!square().has_self_intersecting_borders());
    }

    #[test]
    fn test_formatted_points() {
        let p = square();
        let formatted = p.formatted_points();
        assert_eq!(formatted.len(), p.points().len());
        assert_eq!(formatted[0], "39.9,116.3");
    }

    #[test]
    fn test_serde_round_trip_drops_caches() {
        let p = square();
        let _ = p.borders();
        let json = serde_json::to_string(&p).expect("serialize");
        let back: GeoPolygon = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
        assert_eq!(back.borders().len(), p.borders().len());
    }
}
