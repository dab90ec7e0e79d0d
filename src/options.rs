//! Lenient numeric option parsing for the core tools.
//!
//! Malformed values never fail the run; they fall back to the caller's default.

/// Parse a positive integer from the leading digits of `raw`.
///
/// Leading whitespace and a `+` sign are skipped and anything after the
/// digit run is ignored (`"12px"` is 12). Empty, non-numeric, negative or
/// zero input yields `None`.
pub fn parse_positive(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    match unsigned[..end].parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// `parse_positive` on an optional value, else `default`.
pub fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(parse_positive).unwrap_or(default)
}
