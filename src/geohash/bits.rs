//! Packed-integer geohash codec.
//!
//! Encodes a cell as `2 × precision` interleaved bits of a `u64`, longitude
//! bit before latitude bit at each level, supporting 1 to 32 bit pairs.
//! Unlike the string codec, neighbor cells are derived directly by bit
//! arithmetic on the interleaved planes, with wraparound at the domain edge.

use crate::error::{GridfenceError, Result};
use gridfence_types::{GeoRect, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Longitude bits occupy the odd (higher) positions of each pair.
const LNG_PLANE: u64 = 0xaaaa_aaaa_aaaa_aaaa;
/// Latitude bits occupy the even (lower) positions of each pair.
const LAT_PLANE: u64 = 0x5555_5555_5555_5555;

fn check_range(lat: f64, lng: f64, precision: u8) -> Result<()> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return Err(GridfenceError::InvalidInput(format!(
            "latitude out of range [-90, 90]: {}",
            lat
        )));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng) {
        return Err(GridfenceError::InvalidInput(format!(
            "longitude out of range [-180, 180]: {}",
            lng
        )));
    }
    check_precision(precision)
}

fn check_precision(precision: u8) -> Result<()> {
    if !(1..=32).contains(&precision) {
        return Err(GridfenceError::InvalidPrecision(precision));
    }
    Ok(())
}

/// Encode a point into a packed geohash of `precision` bit pairs.
///
/// # Examples
///
/// ```
/// use gridfence::geohash::bits;
///
/// let packed = bits::encode(39.928, 116.389, 15).unwrap();
/// let cell = bits::decode(packed, 15).unwrap();
/// assert!(cell.contains(gridfence::GeoPoint::new(39.928, 116.389)));
/// ```
pub fn encode(lat: f64, lng: f64, precision: u8) -> Result<u64> {
    check_range(lat, lng, precision)?;

    let (mut min_lat, mut max_lat) = (MIN_LATITUDE, MAX_LATITUDE);
    let (mut min_lng, mut max_lng) = (MIN_LONGITUDE, MAX_LONGITUDE);
    let mut geo: u64 = 0;
    for _ in 0..precision {
        let lat_bit: u64;
        let lng_bit: u64;
        if max_lat - lat >= lat - min_lat {
            lat_bit = 0;
            max_lat = (max_lat + min_lat) / 2.0;
        } else {
            lat_bit = 1;
            min_lat = (max_lat + min_lat) / 2.0;
        }
        if max_lng - lng >= lng - min_lng {
            lng_bit = 0;
            max_lng = (max_lng + min_lng) / 2.0;
        } else {
            lng_bit = 1;
            min_lng = (max_lng + min_lng) / 2.0;
        }
        geo = (geo << 1) | lng_bit;
        geo = (geo << 1) | lat_bit;
    }
    Ok(geo)
}

/// Decode a packed geohash of `precision` bit pairs into its cell rectangle.
pub fn decode(geohash: u64, precision: u8) -> Result<GeoRect> {
    check_precision(precision)?;

    let mut rect = GeoRect::new(MIN_LATITUDE, MIN_LONGITUDE, MAX_LATITUDE, MAX_LONGITUDE);
    let precision = precision as u32;
    for i in 0..precision {
        let lng_bit = (geohash >> ((precision - i) * 2 - 1)) & 0x01;
        let lat_bit = (geohash >> ((precision - i) * 2 - 2)) & 0x01;
        if lat_bit == 0 {
            rect.max_lat = (rect.max_lat + rect.min_lat) / 2.0;
        } else {
            rect.min_lat = (rect.max_lat + rect.min_lat) / 2.0;
        }
        if lng_bit == 0 {
            rect.max_lng = (rect.max_lng + rect.min_lng) / 2.0;
        } else {
            rect.min_lng = (rect.max_lng + rect.min_lng) / 2.0;
        }
    }
    Ok(rect)
}

/// The packed cell containing the point plus its 8 compass neighbors, self
/// first.
pub fn neighbors(lat: f64, lng: f64, precision: u8) -> Result<Vec<u64>> {
    let geohash = encode(lat, lng, precision)?;
    Ok(vec![
        geohash,
        move_cell(geohash, precision, 0, 1),   // north
        move_cell(geohash, precision, 0, -1),  // south
        move_cell(geohash, precision, 1, 0),   // east
        move_cell(geohash, precision, -1, 0),  // west
        move_cell(geohash, precision, -1, -1), // south-west
        move_cell(geohash, precision, 1, -1),  // south-east
        move_cell(geohash, precision, -1, 1),  // north-west
        move_cell(geohash, precision, 1, 1),   // north-east
    ])
}

/// Shift a packed cell by one step on the longitude (`dx`) and/or latitude
/// (`dy`) plane, wrapping at the domain edge.
///
/// Incrementing one plane of the interleaved value works by filling the
/// other plane's bit positions with ones so that the carry propagates
/// through them, then masking the result back to its own plane.
fn move_cell(geohash: u64, precision: u8, dx: i8, dy: i8) -> u64 {
    let shift = 64 - u32::from(precision) * 2;
    let mut geo = geohash;
    if dx != 0 {
        let mut x = geo & LNG_PLANE;
        let y = geo & LAT_PLANE;
        let zz = LAT_PLANE >> shift;
        if dx > 0 {
            x = x.wrapping_add(zz + 1);
        } else {
            x |= zz;
            x = x.wrapping_sub(zz + 1);
        }
        x &= LNG_PLANE >> shift;
        geo = x | y;
    }
    if dy != 0 {
        let x = geo & LNG_PLANE;
        let mut y = geo & LAT_PLANE;
        let zz = LNG_PLANE >> shift;
        if dy > 0 {
            y = y.wrapping_add(zz + 1);
        } else {
            y |= zz;
            y = y.wrapping_sub(zz + 1);
        }
        y &= LAT_PLANE >> shift;
        geo = x | y;
    }
    geo
}
