//! Time-of-day token parsing.

use super::ResolveError;
use chrono::NaiveTime;
use std::ops::RangeInclusive;

/// Parses `H.MM`, `H:MM` or a bare `H` into a wall-clock time.
///
/// A single minute digit is a minute count, so `9.5` is 09:05.
pub(super) fn parse_time_token(token: &str) -> Result<NaiveTime, ResolveError> {
    let invalid = || ResolveError::InvalidTime(token.to_owned());
    let normalized = token.trim().replace('.', ":");
    let (hours, minutes) = normalized
        .split_once(':')
        .unwrap_or((normalized.as_str(), "00"));

    if !is_ascii_digits(hours, 1..=2) || !is_ascii_digits(minutes, 1..=2) {
        return Err(invalid());
    }

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Returns whether `value` is made only of ASCII digits with a length in
/// `allowed_len`.
pub(super) fn is_ascii_digits(value: &str, allowed_len: RangeInclusive<usize>) -> bool {
    allowed_len.contains(&value.len()) && value.bytes().all(|byte| byte.is_ascii_digit())
}
