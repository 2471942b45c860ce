//! Geometric primitives for polygon-to-grid rasterization.
//!
//! This crate holds the plain value types ([`GeoPoint`], [`GeoSegment`],
//! [`GeoRect`], [`GeoCircle`], [`GeoPolygon`]) and the spherical-earth
//! functions in [`earth`]. Everything here is synchronous, allocation-light,
//! and free of I/O; the geohash codec and the rasterizer itself live in the
//! `gridfence` crate.

pub mod circle;
pub mod earth;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod segment;

pub use circle::GeoCircle;
pub use point::GeoPoint;
pub use polygon::GeoPolygon;
pub use rect::GeoRect;
pub use segment::{GeoSegment, Intersection};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LONGITUDE: f64 = 180.0;
pub const MIN_LONGITUDE: f64 = -180.0;

/// Tolerance when comparing a cross product of geodetic coordinates to zero.
///
/// Double-precision arithmetic on lat/lng degrees never yields an exact zero
/// for genuinely collinear points, so "on the line" tests compare against
/// this constant instead.
pub const FLOAT_TOLERANCE: f64 = 2e-10;

/// Maximum bounding-box edge length (in meters) a polygon may have and still
/// be accepted by the rasterizer and the containment tests.
pub const MAX_POLYGON_SPAN_METERS: f64 = 100_000.0;
