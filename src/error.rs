//! Error types for caller-input failures.
//!
//! Geometric invalidity (bad polygon, out-of-range point) never surfaces
//! here: those paths fail soft to empty results so batch rasterization can
//! keep going. Errors are reserved for malformed caller input to the codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridfenceError {
    /// Latitude or longitude outside the valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Packed geohash precision outside `[1, 32]` bit pairs.
    #[error("geohash precision out of range [1, 32]: {0}")]
    InvalidPrecision(u8),
}

pub type Result<T> = std::result::Result<T, GridfenceError>;
