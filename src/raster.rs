//! Polygon-to-grid decomposition.
//!
//! [`rasterize`] covers a polygon with geohash cells at a fixed precision
//! and partitions them into cells fully inside the polygon and cells only
//! partially overlapping it. The output feeds a term index: point-in-polygon
//! queries become cell-membership lookups on the emitted hashes.
//!
//! Classification uses the extended ray-cast test: each candidate cell's
//! four border lines are extended across the whole grid and intersected
//! against every polygon border. A crossing landing strictly inside the
//! cell's own span makes it a boundary cell; otherwise the cell is inside
//! exactly when the top ray's crossing counts to its left and to its right
//! are both odd. Rays are shared between adjacent cells, so each unique ray
//! is intersected once and memoized.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geohash;
use gridfence_types::{GeoPoint, GeoPolygon, GeoRect, GeoSegment};

/// The grid cells covering a polygon, split by overlap kind.
///
/// Both lists are order-irrelevant sets of geohash strings at
/// [`CellCover::precision`] characters, disjoint by construction, suitable
/// for direct insertion into an inverted index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellCover {
    /// Cells entirely covered by the polygon.
    pub inside: Vec<String>,
    /// Cells partially overlapping the polygon.
    pub boundary: Vec<String>,
    /// Geohash precision of every emitted cell, in characters.
    pub precision: usize,
}

impl CellCover {
    fn empty(precision: usize) -> Self {
        CellCover {
            inside: Vec::new(),
            boundary: Vec::new(),
            precision,
        }
    }

    /// Whether no cells were emitted.
    pub fn is_empty(&self) -> bool {
        self.inside.is_empty() && self.boundary.is_empty()
    }

    /// Total number of emitted cells.
    pub fn cell_count(&self) -> usize {
        self.inside.len() + self.boundary.len()
    }
}

/// One polygon border crossing a ray, with the crossing point snapped onto
/// the ray.
#[derive(Debug, Clone, Copy)]
struct RayHit {
    border: GeoSegment,
    point: GeoPoint,
}

type RayHits = SmallVec<[RayHit; 4]>;

/// Cache key for a ray, built from the endpoint bit patterns. Rays shared by
/// adjacent cells produce identical bits, so value equality is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RayKey {
    a_lat: u64,
    a_lng: u64,
    b_lat: u64,
    b_lng: u64,
}

impl RayKey {
    fn of(line: &GeoSegment) -> Self {
        RayKey {
            a_lat: line.a.lat.to_bits(),
            a_lng: line.a.lng.to_bits(),
            b_lat: line.b.lat.to_bits(),
            b_lng: line.b.lng.to_bits(),
        }
    }
}

type RayCache = FxHashMap<RayKey, Rc<RayHits>>;

enum CellClass {
    Inside,
    Boundary,
    Outside,
}

/// Decompose a polygon into geohash cells at the given precision.
///
/// Invalid polygons (fewer than 3 vertices, bounding box of 100 km or more
/// on either axis) fail soft to an empty cover. A polygon no larger than a
/// single cell emits just the cell under its bounding-box midpoint, as a
/// boundary cell.
///
/// # Examples
///
/// ```
/// use gridfence::{GeoPoint, GeoPolygon, rasterize};
///
/// let polygon = GeoPolygon::new(vec![
///     GeoPoint::new(39.8694, 116.2793),
///     GeoPoint::new(39.9957, 116.2793),
///     GeoPoint::new(39.9957, 116.4551),
///     GeoPoint::new(39.8694, 116.4551),
/// ]);
/// let cover = rasterize(&polygon, 6);
/// assert!(!cover.inside.is_empty());
/// assert!(!cover.boundary.is_empty());
/// ```
pub fn rasterize(polygon: &GeoPolygon, precision: usize) -> CellCover {
    let mut cover = CellCover::empty(precision);
    if !polygon.is_valid() {
        log::warn!(
            "rejecting invalid polygon with {} vertices",
            polygon.points().len()
        );
        return cover;
    }

    let min_rect = polygon.bounds();

    // Reference cell at the north-west corner of the bounding box; every
    // cell at this precision has the same degree spans.
    let Some((_, ref_cell)) = geohash::encode(min_rect.max_lat, min_rect.min_lng, precision) else {
        return cover;
    };
    let ref_mid = ref_cell.mid_point();
    let cell_lat_span = ref_cell.lat_span();
    let cell_lng_span = ref_cell.lng_span();

    // A polygon no larger than one cell collapses to the single cell under
    // its bounding-box midpoint.
    if min_rect.width() <= ref_cell.width() && min_rect.height() <= ref_cell.height() {
        let mid = min_rect.mid_point();
        if let Some((hash, _)) = geohash::encode(mid.lat, mid.lng, precision) {
            cover.boundary.push(hash);
        }
        return cover;
    }

    let Some((_, sw_cell)) = geohash::encode(min_rect.min_lat, min_rect.min_lng, precision) else {
        return cover;
    };
    let Some((_, ne_cell)) = geohash::encode(min_rect.max_lat, min_rect.max_lng, precision) else {
        return cover;
    };

    // Smallest grid-aligned rectangle fully covering the bounding box. It
    // holds a whole number of cells by construction.
    let grid_rect = GeoRect::new(
        sw_cell.min_lat,
        sw_cell.min_lng,
        ne_cell.max_lat,
        ne_cell.max_lng,
    );

    // Row/column counts. The meter-space quotients land near integers but
    // drift both ways (23.9997 or 24.0001); round up within a 0.1-cell
    // tolerance and never let a count hit zero.
    let rows_exact = grid_rect.height() / ne_cell.height();
    let cols_exact = grid_rect.width() / ne_cell.width();
    let mut rows = rows_exact as usize;
    let mut cols = cols_exact as usize;
    if (rows_exact - rows as f64).abs() > 0.1 || rows == 0 {
        rows += 1;
    }
    if (cols_exact - cols as f64).abs() > 0.1 || cols == 0 {
        cols += 1;
    }
    log::debug!(
        "splitting polygon into {} x {} candidate cells at precision {}",
        rows,
        cols,
        precision
    );

    // March from the north-west cell midpoint: south by rows, east by
    // columns.
    let base_point = ref_mid;
    let borders = polygon.borders();
    let mut cache: RayCache = FxHashMap::default();

    for row in 0..rows {
        let base_lat = base_point.lat - row as f64 * cell_lat_span;
        for col in 0..cols {
            let lng = base_point.lng + col as f64 * cell_lng_span;
            let Some((hash, cell)) = geohash::encode(base_lat, lng, precision) else {
                continue;
            };

            // The four border lines, extended one degree past the grid on
            // both ends so every polygon border is in reach.
            let top_line = GeoSegment::new(
                GeoPoint::new(cell.max_lat, grid_rect.min_lng - 1.0),
                GeoPoint::new(cell.max_lat, grid_rect.max_lng + 1.0),
            );
            let bottom_line = GeoSegment::new(
                GeoPoint::new(cell.min_lat, grid_rect.min_lng - 1.0),
                GeoPoint::new(cell.min_lat, grid_rect.max_lng + 1.0),
            );
            let left_line = GeoSegment::new(
                GeoPoint::new(grid_rect.max_lat + 1.0, cell.min_lng),
                GeoPoint::new(grid_rect.min_lat - 1.0, cell.min_lng),
            );
            let right_line = GeoSegment::new(
                GeoPoint::new(grid_rect.max_lat + 1.0, cell.max_lng),
                GeoPoint::new(grid_rect.min_lat - 1.0, cell.max_lng),
            );

            let top_hits = cached_hits(&mut cache, &top_line, || {
                horizontal_crossings(borders, &top_line)
            });
            let bottom_hits = cached_hits(&mut cache, &bottom_line, || {
                horizontal_crossings(borders, &bottom_line)
            });
            let left_hits = cached_hits(&mut cache, &left_line, || {
                vertical_crossings(borders, &left_line)
            });
            let right_hits = cached_hits(&mut cache, &right_line, || {
                vertical_crossings(borders, &right_line)
            });

            match classify(&cell, &top_hits, &bottom_hits, &left_hits, &right_hits) {
                CellClass::Inside => cover.inside.push(hash),
                CellClass::Boundary => cover.boundary.push(hash),
                CellClass::Outside => {}
            }
        }
    }

    cover
}

fn cached_hits(
    cache: &mut RayCache,
    line: &GeoSegment,
    compute: impl FnOnce() -> RayHits,
) -> Rc<RayHits> {
    let key = RayKey::of(line);
    if let Some(hits) = cache.get(&key) {
        return Rc::clone(hits);
    }
    let hits = Rc::new(compute());
    cache.insert(key, Rc::clone(&hits));
    hits
}

/// Classify one cell from the crossings of its four extended border lines.
fn classify(
    cell: &GeoRect,
    top: &[RayHit],
    bottom: &[RayHit],
    left: &[RayHit],
    right: &[RayHit],
) -> CellClass {
    for hit in bottom {
        // A crossing strictly inside the bottom span whose border continues
        // upward means partial overlap.
        if hit.point.lng > cell.min_lng
            && hit.point.lng < cell.max_lng
            && (hit.border.a.lat > hit.point.lat || hit.border.b.lat > hit.point.lat)
        {
            return CellClass::Boundary;
        }
        // A border entering at one bottom corner and leaving at the opposite
        // top corner runs along the cell diagonal.
        let Some(top_hit) = top.iter().find(|h| h.border == hit.border) else {
            continue;
        };
        if (hit.point.lng == cell.min_lng && top_hit.point.lng == cell.max_lng)
            || (hit.point.lng == cell.max_lng && top_hit.point.lng == cell.min_lng)
        {
            return CellClass::Boundary;
        }
    }

    for hit in left {
        if hit.point.lat < cell.max_lat
            && hit.point.lat > cell.min_lat
            && (hit.border.a.lng > hit.point.lng || hit.border.b.lng > hit.point.lng)
        {
            return CellClass::Boundary;
        }
        let Some(right_hit) = right.iter().find(|h| h.border == hit.border) else {
            continue;
        };
        if (hit.point.lat == cell.max_lat && right_hit.point.lat == cell.min_lat)
            || (hit.point.lat == cell.min_lat && right_hit.point.lat == cell.max_lat)
        {
            return CellClass::Boundary;
        }
    }

    for hit in right {
        if hit.point.lat < cell.max_lat
            && hit.point.lat > cell.min_lat
            && (hit.border.a.lng < hit.point.lng || hit.border.b.lng < hit.point.lng)
        {
            return CellClass::Boundary;
        }
    }

    // Parity of the top ray's crossings strictly left and strictly right of
    // the cell decides full containment.
    let mut left_crossings = 0u32;
    let mut right_crossings = 0u32;
    for hit in top {
        if hit.point.lng <= cell.min_lng {
            left_crossings += 1;
            continue;
        }
        if hit.point.lng >= cell.max_lng {
            right_crossings += 1;
            continue;
        }
        if hit.border.a.lat < hit.point.lat || hit.border.b.lat < hit.point.lat {
            return CellClass::Boundary;
        }
    }
    if left_crossings % 2 == 1 && right_crossings % 2 == 1 {
        CellClass::Inside
    } else {
        CellClass::Outside
    }
}

/// Crossings of a horizontal ray with the polygon borders.
///
/// Borders parallel to the ray contribute nothing; a crossing exactly at a
/// border endpoint counts only when the border continues below the ray, so
/// each vertex on the ray is attributed to at most one of its two edges.
fn horizontal_crossings(borders: &[GeoSegment], line: &GeoSegment) -> RayHits {
    let mut hits = RayHits::new();
    let max_lng = line.a.lng.max(line.b.lng);
    let min_lng = line.a.lng.min(line.b.lng);
    let lat = line.b.lat;
    for border in borders {
        if border.a.lat > lat && border.b.lat > lat {
            continue;
        }
        if border.a.lat < lat && border.b.lat < lat {
            continue;
        }
        if border.a.lat == border.b.lat {
            continue;
        }
        if border.a.lat == lat && (min_lng..=max_lng).contains(&border.a.lng) {
            if border.b.lat <= lat {
                hits.push(RayHit {
                    border: *border,
                    point: GeoPoint::new(lat, border.a.lng),
                });
            }
            continue;
        }
        if border.b.lat == lat && (min_lng..=max_lng).contains(&border.b.lng) {
            if border.a.lat <= lat {
                hits.push(RayHit {
                    border: *border,
                    point: GeoPoint::new(lat, border.b.lng),
                });
            }
            continue;
        }
        let x = border.intersection(line);
        if x.intersects && !x.is_parallel {
            if let Some(p) = x.point {
                // Snap the hit back onto the ray latitude.
                hits.push(RayHit {
                    border: *border,
                    point: GeoPoint::new(lat, p.lng),
                });
            }
        }
    }
    hits
}

/// Crossings of a vertical ray with the polygon borders.
fn vertical_crossings(borders: &[GeoSegment], line: &GeoSegment) -> RayHits {
    let mut hits = RayHits::new();
    let lng = line.b.lng;
    for border in borders {
        if border.a.lng > lng && border.b.lng > lng {
            continue;
        }
        if border.a.lng < lng && border.b.lng < lng {
            continue;
        }
        if border.a.lng == border.b.lng {
            continue;
        }
        let x = border.intersection(line);
        if x.intersects && !x.is_parallel {
            if let Some(p) = x.point {
                hits.push(RayHit {
                    border: *border,
                    point: GeoPoint::new(p.lat, lng),
                });
            }
        }
    }
    hits
}
