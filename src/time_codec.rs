//! Pace and duration text codec
//!
//! Converts `MM:SS` / `H:MM:SS` strings to seconds and back. The lenient
//! parser maps malformed text to a zero duration so downstream calculations
//! degrade to well-formed (if meaningless) values instead of failing.

use crate::error::PaceError;

/// Text rendered for durations that cannot be displayed
pub const NOT_AVAILABLE: &str = "N/A";

/// Largest duration `format_duration` renders; whole tenths must fit a `u64`
pub const MAX_DISPLAY_SECONDS: f64 = u64::MAX as f64 / 10.0;

/// Parse `MM:SS` or `H:MM:SS` into seconds, returning `0.0` for malformed input.
pub fn parse_duration(text: &str) -> f64 {
    try_parse_duration(text).unwrap_or(0.0)
}

/// Strict variant of [`parse_duration`].
///
/// Hours and minutes must be non-negative integers. Unlike them, the seconds
/// component may carry a fraction (`19:59.5` is 1199.5 s), so watch splits
/// can be pasted in as read.
pub fn try_parse_duration(text: &str) -> Result<f64, PaceError> {
    let invalid = || PaceError::InvalidTime {
        input: text.to_string(),
    };

    let parts: Vec<&str> = text.trim().split(':').map(str::trim).collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [m, s] => (0, parse_whole(m), parse_seconds(s)),
        [h, m, s] => (parse_whole(h).ok_or_else(invalid)?, parse_whole(m), parse_seconds(s)),
        _ => return Err(invalid()),
    };

    let minutes = minutes.ok_or_else(invalid)?;
    let seconds = seconds.ok_or_else(invalid)?;

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

fn parse_whole(part: &str) -> Option<u64> {
    part.parse::<u64>().ok()
}

fn parse_seconds(part: &str) -> Option<f64> {
    if part.is_empty() || part.starts_with(['+', '-']) {
        return None;
    }
    part.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Render seconds as `M:SS`, or `M:SS.t` when `with_tenths` is set.
///
/// Non-finite, negative and huge (at or above [`MAX_DISPLAY_SECONDS`]) input
/// renders as `"N/A"`. Without tenths the seconds are truncated, matching how
/// paces are read off a watch.
pub fn format_duration(seconds: f64, with_tenths: bool) -> String {
    if !seconds.is_finite() || !(0.0..MAX_DISPLAY_SECONDS).contains(&seconds) {
        return NOT_AVAILABLE.to_string();
    }

    if with_tenths {
        // Round once to whole tenths so a carry rolls into the seconds.
        let tenths_total = (seconds * 10.0).round();
        let whole = (tenths_total / 10.0).floor();
        let tenths = (tenths_total - whole * 10.0) as u64;
        let whole = whole as u64;
        format!("{}:{:02}.{}", whole / 60, whole % 60, tenths)
    } else {
        let whole = seconds.floor() as u64;
        format!("{}:{:02}", whole / 60, whole % 60)
    }
}
