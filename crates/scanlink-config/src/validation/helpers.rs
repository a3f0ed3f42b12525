//! Shared validation helpers.

use regex::Regex;
use std::sync::LazyLock;

/// Accepted server URL schemes followed by a non-empty host.
pub(crate) static SERVER_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?|wss?)://[^\s/?#]+(/\S*)?$").unwrap());

/// Hex color: #RGB, #RRGGBB, or #RRGGBBAA.
pub(crate) static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
