//! Base-32 geohash codec.
//!
//! A geohash names a rectangular cell obtained by recursively bisecting the
//! lat/lng domain, longitude first. The string form groups bisection bits
//! into 5-bit base-32 characters; the packed integer form in [`bits`] keeps
//! them as raw interleaved bits. Decoding never recovers the original point,
//! only the cell rectangle.

pub mod bits;

use once_cell::sync::Lazy;

use gridfence_types::{GeoRect, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// The standard geohash alphabet, omitting `a`, `i`, `l`, `o`.
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bit masks for filling a 5-bit character accumulator, high bit first.
const CHAR_BITS: [u8; 5] = [16, 8, 4, 2, 1];

/// Reverse lookup from byte to alphabet position, -1 for bytes outside the
/// alphabet.
static BASE32_POS: Lazy<[i8; 256]> = Lazy::new(|| {
    let mut table = [-1i8; 256];
    for (i, &c) in BASE32.iter().enumerate() {
        table[c as usize] = i as i8;
    }
    table
});

/// Encode a point into the geohash cell containing it.
///
/// Returns the base-32 string of `precision` characters together with the
/// cell rectangle, since most callers need both. Returns `None` when the
/// coordinates are outside the valid lat/lng domain.
///
/// # Examples
///
/// ```
/// use gridfence::geohash;
///
/// let (hash, cell) = geohash::encode(39.928, 116.389, 8).unwrap();
/// assert_eq!(hash, "wx4g0kxv");
/// assert!(cell.contains(gridfence::GeoPoint::new(39.928, 116.389)));
/// assert!(geohash::encode(95.0, 116.389, 8).is_none());
/// ```
pub fn encode(lat: f64, lng: f64, precision: usize) -> Option<(String, GeoRect)> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&lat) {
        return None;
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&lng) {
        return None;
    }

    let mut out = String::with_capacity(precision);
    let (mut min_lat, mut max_lat) = (MIN_LATITUDE, MAX_LATITUDE);
    let (mut min_lng, mut max_lng) = (MIN_LONGITUDE, MAX_LONGITUDE);

    let mut bit = 0usize;
    let mut ch = 0usize;
    let mut is_even = true;
    let mut emitted = 0usize;
    while emitted < precision {
        if is_even {
            // Even steps bisect longitude.
            let mid = (min_lng + max_lng) / 2.0;
            if mid < lng {
                ch |= CHAR_BITS[bit] as usize;
                min_lng = mid;
            } else {
                max_lng = mid;
            }
        } else {
            let mid = (min_lat + max_lat) / 2.0;
            if mid < lat {
                ch |= CHAR_BITS[bit] as usize;
                min_lat = mid;
            } else {
                max_lat = mid;
            }
        }
        is_even = !is_even;
        if bit < CHAR_BITS.len() - 1 {
            bit += 1;
        } else {
            out.push(BASE32[ch] as char);
            bit = 0;
            ch = 0;
            emitted += 1;
        }
    }

    Some((out, GeoRect::new(min_lat, min_lng, max_lat, max_lng)))
}

/// Decode a geohash back into its cell rectangle.
///
/// Returns `None` when any character falls outside the alphabet.
pub fn decode(geohash: &str) -> Option<GeoRect> {
    let mut lats = [MIN_LATITUDE, MAX_LATITUDE];
    let mut lngs = [MIN_LONGITUDE, MAX_LONGITUDE];
    let mut is_even = true;
    for byte in geohash.bytes() {
        let pos = BASE32_POS[byte as usize];
        if pos < 0 {
            return None;
        }
        for &mask in &CHAR_BITS {
            // A set bit narrows the lower bound, a clear bit the upper.
            let idx = usize::from(pos as u8 & mask == 0);
            if is_even {
                lngs[idx] = (lngs[0] + lngs[1]) / 2.0;
            } else {
                lats[idx] = (lats[0] + lats[1]) / 2.0;
            }
            is_even = !is_even;
        }
    }
    Some(GeoRect::new(lats[0], lngs[0], lats[1], lngs[1]))
}

/// The cell containing the point plus its 8 compass neighbors, 9 hashes in
/// total with self first.
///
/// Neighbors are derived by re-encoding the cell midpoint offset by one
/// cell span in each direction. Returns an empty vector for out-of-range
/// input; at the edges of the domain individual neighbors may be empty
/// strings.
pub fn neighbors(lat: f64, lng: f64, precision: usize) -> Vec<String> {
    let Some((cur, cell)) = encode(lat, lng, precision) else {
        return Vec::new();
    };
    let lat_span = cell.lat_span();
    let lng_span = cell.lng_span();
    let center_lat = (cell.min_lat + cell.max_lat) / 2.0;
    let center_lng = (cell.min_lng + cell.max_lng) / 2.0;

    let mut out = Vec::with_capacity(9);
    out.push(cur);
    // Up, down, left, right, then the four diagonals.
    for (dy, dx) in [
        (1.0, 0.0),
        (-1.0, 0.0),
        (0.0, -1.0),
        (0.0, 1.0),
        (1.0, -1.0),
        (-1.0, -1.0),
        (1.0, 1.0),
        (-1.0, 1.0),
    ] {
        let hash = encode(center_lat + dy * lat_span, center_lng + dx * lng_span, precision)
            .map(|(h, _)| h)
            .unwrap_or_default();
        out.push(hash);
    }
    out
}
