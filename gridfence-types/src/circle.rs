//! Circular regions defined by a center and a radius in meters.

use serde::{Deserialize, Serialize};

use crate::earth;
use crate::point::GeoPoint;

/// A circle on the sphere: center point plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCircle {
    pub center: GeoPoint,
    /// Radius in meters.
    pub radius: f64,
}

impl GeoCircle {
    #[inline]
    pub fn new(center: GeoPoint, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `p` lies within the circle, boundary included.
    pub fn contains(&self, p: GeoPoint) -> bool {
        earth::distance(self.center, p) <= self.radius
    }
}
