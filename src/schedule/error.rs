//! Error types for date/time token resolution.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors returned when chat tokens cannot be turned into a timestamp.
///
/// Every variant is an input-format problem: callers relay them to the user as
/// a correction hint and never treat them as fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The time token is not `H.MM`, `H:MM` or `H`, or is not a 24-hour time.
    #[error("Неверный формат времени '{0}'. Используйте: 9.00 или 17.30")]
    InvalidTime(String),

    /// The date token looks like `D.M` but is not a calendar date.
    #[error("Неверный формат даты '{0}'. Используйте: 9.12")]
    InvalidDate(String),

    /// The date token matches neither a weekday name nor `D.M`.
    #[error("Не удалось распознать дату: {0}")]
    UnrecognisedDate(String),

    /// The wall-clock time falls into a gap of the configured timezone.
    #[error("Время {local} не существует в часовом поясе {timezone}")]
    NonexistentLocalTime {
        /// The requested wall-clock date and time.
        local: NaiveDateTime,
        /// The configured timezone identifier.
        timezone: String,
    },
}

/// Error returned while parsing a weekday policy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown weekday policy: {0}")]
pub struct ParseWeekdayPolicyError(pub String);
