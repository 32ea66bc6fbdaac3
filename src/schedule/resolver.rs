//! Resolver combining date and time tokens into a zoned timestamp.

use super::{
    ResolveError, WeekdayPolicy,
    date::{DateToken, anchor_day_month, next_weekday, parse_date_token},
    time::parse_time_token,
};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

/// Turns chat date/time tokens into absolute timestamps.
///
/// The resolver holds only configuration; it never reads the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeResolver {
    timezone: Tz,
    weekday_policy: WeekdayPolicy,
}

impl DateTimeResolver {
    /// Creates a resolver for the given timezone with the default
    /// [`WeekdayPolicy::NextOccurrence`] policy.
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            weekday_policy: WeekdayPolicy::NextOccurrence,
        }
    }

    /// Sets how a weekday naming the reference date is resolved.
    #[must_use]
    pub const fn with_weekday_policy(mut self, weekday_policy: WeekdayPolicy) -> Self {
        self.weekday_policy = weekday_policy;
        self
    }

    /// Returns the timezone results are expressed in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Returns the configured weekday policy.
    #[must_use]
    pub const fn weekday_policy(&self) -> WeekdayPolicy {
        self.weekday_policy
    }

    /// Resolves `date_token` and `time_token` relative to `reference`.
    ///
    /// The reference instant is first converted into the configured timezone,
    /// so "today" and the current year are those of the configured zone.
    /// Ambiguous local times (a DST fold) resolve to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidTime`] for a malformed time token,
    /// [`ResolveError::InvalidDate`] for a `D.M` token that is not a calendar
    /// date, [`ResolveError::UnrecognisedDate`] for a token matching neither
    /// grammar, and [`ResolveError::NonexistentLocalTime`] when the wall-clock
    /// time is skipped by the timezone.
    pub fn resolve<Z: TimeZone>(
        &self,
        date_token: &str,
        time_token: &str,
        reference: &DateTime<Z>,
    ) -> Result<DateTime<Tz>, ResolveError> {
        let time = parse_time_token(time_token)?;
        let local_reference = reference.with_timezone(&self.timezone);
        let reference_date = local_reference.date_naive();

        let date = match parse_date_token(date_token)? {
            DateToken::Weekday(weekday) => {
                let include_reference = self.weekday_policy == WeekdayPolicy::TodayIfLater
                    && time > local_reference.time();
                next_weekday(reference_date, weekday, include_reference)
            }
            DateToken::DayMonth { day, month } => anchor_day_month(reference_date, day, month),
        }
        .ok_or_else(|| ResolveError::InvalidDate(date_token.to_owned()))?;

        let local = date.and_time(time);
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| ResolveError::NonexistentLocalTime {
                local,
                timezone: self.timezone.name().to_owned(),
            })
    }
}
