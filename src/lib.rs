//! Polygon-to-geohash rasterization for term-based geospatial indexing.
//!
//! Given a service-area polygon, [`rasterize`] covers it with fixed-precision
//! geohash cells split into "fully inside" and "boundary" sets. Indexing
//! those hashes as terms turns point-in-polygon queries into cheap cell
//! lookups: a point whose cell is in the inside set is in the polygon, a
//! boundary-cell hit falls back to one exact [`GeoPolygon::contains_point`]
//! test.
//!
//! ```rust
//! use gridfence::{GeoPoint, GeoPolygon, geohash, rasterize};
//!
//! let polygon = GeoPolygon::new(vec![
//!     GeoPoint::new(39.8694, 116.2793),
//!     GeoPoint::new(39.9957, 116.2793),
//!     GeoPoint::new(39.9957, 116.4551),
//!     GeoPoint::new(39.8694, 116.4551),
//! ]);
//! let cover = rasterize(&polygon, 6);
//! assert!(!cover.inside.is_empty());
//!
//! let (hash, _) = geohash::encode(39.928, 116.389, 6).unwrap();
//! assert!(cover.inside.contains(&hash) || cover.boundary.contains(&hash));
//! ```

pub mod distance;
pub mod error;
pub mod geohash;
pub mod raster;
pub mod viz;

pub use error::{GridfenceError, Result};

pub use raster::{CellCover, rasterize};

pub use gridfence_types::{
    FLOAT_TOLERANCE, GeoCircle, GeoPoint, GeoPolygon, GeoRect, GeoSegment, Intersection,
    MAX_LATITUDE, MAX_LONGITUDE, MAX_POLYGON_SPAN_METERS, MIN_LATITUDE, MIN_LONGITUDE, earth,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridfenceError, Result};

    pub use crate::{CellCover, rasterize};

    pub use crate::geohash;

    pub use crate::distance::parse_distance;

    pub use gridfence_types::{GeoCircle, GeoPoint, GeoPolygon, GeoRect, GeoSegment, earth};
}
