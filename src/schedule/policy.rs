//! Policy for resolving a weekday name that matches the reference date.

use super::ParseWeekdayPolicyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a weekday token naming the reference date's own weekday is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayPolicy {
    /// Always the next occurrence strictly after the reference date, so the
    /// reference date itself can never be named by its weekday.
    #[default]
    NextOccurrence,
    /// The reference date counts when the requested time of day is strictly
    /// later than the reference time of day.
    TodayIfLater,
}

impl WeekdayPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NextOccurrence => "next_occurrence",
            Self::TodayIfLater => "today_if_later",
        }
    }
}

impl FromStr for WeekdayPolicy {
    type Err = ParseWeekdayPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "next_occurrence" => Ok(Self::NextOccurrence),
            "today_if_later" => Ok(Self::TodayIfLater),
            _ => Err(ParseWeekdayPolicyError(value.to_owned())),
        }
    }
}

impl fmt::Display for WeekdayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
