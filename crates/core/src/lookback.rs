//! Lookback token parsing.
//!
//! A lookback token is a short human-readable duration of the form
//! `<integer><unit>` (e.g. `5d`, `30S`) bounding how far back in time a
//! telemetry query reaches. The parsed result is a millisecond count;
//! zero means "latest value only".

use crate::error::CoreError;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Parse an optional lookback token into a millisecond duration.
///
/// * `None` or an empty string parses to `0` (latest-only).
/// * The unit suffix is one of `s`, `m`, `h`, `d` (case-insensitive).
/// * An unrecognized unit suffix parses to `0`. Callers cannot tell this
///   apart from an absent token; the behaviour is long-standing and kept
///   as-is (see the `unknown_unit_*` tests).
/// * A malformed integer portion is a [`CoreError::Validation`].
pub fn parse_lookback(token: Option<&str>) -> Result<u64, CoreError> {
    let Some(token) = token else {
        return Ok(0);
    };
    if token.is_empty() {
        return Ok(0);
    }

    let unit_len = token.chars().next_back().map_or(0, char::len_utf8);
    let (value_part, unit_part) = token.split_at(token.len() - unit_len);

    let value: u64 = value_part.parse().map_err(|_| {
        CoreError::Validation(format!("Invalid lookback value: {token:?}"))
    })?;

    let multiplier = match unit_part.to_ascii_lowercase().as_str() {
        "s" => MILLIS_PER_SECOND,
        "m" => MILLIS_PER_MINUTE,
        "h" => MILLIS_PER_HOUR,
        "d" => MILLIS_PER_DAY,
        // Unknown unit: treated as "no lookback" rather than rejected.
        _ => return Ok(0),
    };

    Ok(value.saturating_mul(multiplier))
}
