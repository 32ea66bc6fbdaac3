//! Date token grammars: weekday names and `D.M` pairs.

use super::{ResolveError, time::is_ascii_digits};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Recognised weekday spellings, lowercase.
const WEEKDAY_NAMES: [(&str, Weekday); 28] = [
    ("пн", Weekday::Mon),
    ("понедельник", Weekday::Mon),
    ("вт", Weekday::Tue),
    ("вторник", Weekday::Tue),
    ("ср", Weekday::Wed),
    ("среда", Weekday::Wed),
    ("чт", Weekday::Thu),
    ("четверг", Weekday::Thu),
    ("пт", Weekday::Fri),
    ("пятница", Weekday::Fri),
    ("сб", Weekday::Sat),
    ("суббота", Weekday::Sat),
    ("вс", Weekday::Sun),
    ("воскресенье", Weekday::Sun),
    ("mo", Weekday::Mon),
    ("monday", Weekday::Mon),
    ("tu", Weekday::Tue),
    ("tuesday", Weekday::Tue),
    ("we", Weekday::Wed),
    ("wednesday", Weekday::Wed),
    ("th", Weekday::Thu),
    ("thursday", Weekday::Thu),
    ("fr", Weekday::Fri),
    ("friday", Weekday::Fri),
    ("sa", Weekday::Sat),
    ("saturday", Weekday::Sat),
    ("su", Weekday::Sun),
    ("sunday", Weekday::Sun),
];

/// A date token after grammar matching, before it is anchored to a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DateToken {
    Weekday(Weekday),
    DayMonth { day: u32, month: u32 },
}

/// Matches a date token against the weekday grammar, then the `D.M` grammar.
pub(super) fn parse_date_token(token: &str) -> Result<DateToken, ResolveError> {
    let normalized = token.trim().to_lowercase();

    if let Some(weekday) = weekday_from_name(&normalized) {
        return Ok(DateToken::Weekday(weekday));
    }

    if let Some((day, month)) = normalized.split_once('.') {
        let invalid = || ResolveError::InvalidDate(token.to_owned());
        if !is_ascii_digits(day, 1..=2) || !is_ascii_digits(month, 1..=2) {
            return Err(invalid());
        }
        return Ok(DateToken::DayMonth {
            day: day.parse().map_err(|_| invalid())?,
            month: month.parse().map_err(|_| invalid())?,
        });
    }

    Err(ResolveError::UnrecognisedDate(token.to_owned()))
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAY_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, weekday)| *weekday)
}

/// Returns the next date on `target` after `reference`.
///
/// The reference date itself is only returned when `include_reference` is set
/// and it already falls on `target`; otherwise the result is between one and
/// seven days ahead.
pub(super) fn next_weekday(
    reference: NaiveDate,
    target: Weekday,
    include_reference: bool,
) -> Option<NaiveDate> {
    let target_index = target.num_days_from_monday();
    let reference_index = reference.weekday().num_days_from_monday();
    let days_ahead = if target_index > reference_index {
        target_index - reference_index
    } else if target_index == reference_index && include_reference {
        0
    } else {
        target_index + 7 - reference_index
    };
    reference.checked_add_days(Days::new(u64::from(days_ahead)))
}

/// Anchors a `D.M` pair to the reference year, rolling into the next year when
/// the pair is strictly before the reference month and day.
pub(super) fn anchor_day_month(reference: NaiveDate, day: u32, month: u32) -> Option<NaiveDate> {
    let year = if (month, day) < (reference.month(), reference.day()) {
        reference.year().checked_add(1)?
    } else {
        reference.year()
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
