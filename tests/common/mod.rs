//! Shared helpers for the integration suites.

use gridfence::{GeoPoint, GeoPolygon, GeoRect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate random simple polygons inside `base_rect`.
///
/// Mirrors how service areas are drawn by hand: vertices are sampled
/// uniformly and a vertex is rejected whenever it would make any two
/// non-adjacent borders cross, so every returned polygon passes
/// `has_self_intersecting_borders() == false`. Seeded for repeatability.
pub fn gen_polygons(
    base_rect: &GeoRect,
    polygon_num: usize,
    point_min: usize,
    point_max: usize,
    seed: u64,
) -> Vec<GeoPolygon> {
    assert!(point_min >= 3);
    assert!(point_max >= point_min);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ret = Vec::with_capacity(polygon_num);

    for _ in 0..polygon_num {
        let vertex_num = rng.gen_range(point_min..=point_max);
        let mut points: Vec<GeoPoint> = Vec::with_capacity(vertex_num);
        let mut attempts = 0;
        while points.len() < vertex_num {
            attempts += 1;
            assert!(attempts < 10_000, "polygon generation did not converge");

            let lat = rng.gen_range(base_rect.min_lat..base_rect.max_lat);
            let lng = rng.gen_range(base_rect.min_lng..base_rect.max_lng);
            points.push(GeoPoint::new(lat, lng));

            if points.len() >= 3 {
                let candidate = GeoPolygon::new(points.clone());
                if candidate.has_self_intersecting_borders() {
                    points.pop();
                }
            }
        }
        ret.push(GeoPolygon::new(points));
    }
    ret
}
