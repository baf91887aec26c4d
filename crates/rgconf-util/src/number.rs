//! Numeric option values.
//!
//! Numbers are stored as text. The accepted grammar is: the empty string (meaning zero), a run of
//! decimal digits, or `0x` followed by at least one hex digit.

pub fn is_number_value(val: &str) -> bool {
    if val.is_empty() {
        return true;
    }

    if let Some(hex) = val.strip_prefix("0x") {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    val.chars().all(|c| c.is_ascii_digit())
}

/// Parses a value accepted by [`is_number_value`]. Returns `None` for anything else, or when the
/// number does not fit in an `i64`.
pub fn parse_number(val: &str) -> Option<i64> {
    if !is_number_value(val) {
        return None;
    }

    if val.is_empty() {
        return Some(0);
    }

    match val.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}
