//! Human distance-string parsing.

/// Convert a distance string like `"5.5km"` or `"5000m"` to meters.
///
/// Case-insensitive on the unit. Any input that is not digits-and-dots
/// followed by `km` or `m` yields `0.0` rather than an error, so callers can
/// feed user input straight through.
///
/// # Examples
///
/// ```
/// use gridfence::distance::parse_distance;
///
/// assert_eq!(parse_distance("5.5km"), 5500.0);
/// assert_eq!(parse_distance("5000m"), 5000.0);
/// assert_eq!(parse_distance("soon"), 0.0);
/// ```
pub fn parse_distance(distance: &str) -> f64 {
    let lower = distance.to_lowercase();
    if let Some(magnitude) = lower.strip_suffix("km") {
        return parse_magnitude(magnitude).map_or(0.0, |v| v * 1000.0);
    }
    if let Some(magnitude) = lower.strip_suffix('m') {
        return parse_magnitude(magnitude).unwrap_or(0.0);
    }
    0.0
}

/// Parse a non-negative decimal magnitude: digits and dots only, starting
/// with a digit.
fn parse_magnitude(s: &str) -> Option<f64> {
    if !s.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    s.parse().ok()
}
