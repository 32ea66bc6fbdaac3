//! Calendar event payload derived from a task.

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Description attached to every mirrored event.
const EVENT_DESCRIPTION: &str = "Создано через Telegram бота";

/// A calendar event mirroring a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    summary: String,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    timezone: Tz,
}

impl CalendarEvent {
    /// Creates a one-hour event starting at the task's due timestamp.
    #[must_use]
    pub fn for_task(summary: impl Into<String>, start: DateTime<FixedOffset>, timezone: Tz) -> Self {
        Self {
            summary: summary.into(),
            start,
            end: start + TimeDelta::hours(1),
            timezone,
        }
    }

    /// Returns the event title.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the event start.
    #[must_use]
    pub const fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    /// Returns the event end.
    #[must_use]
    pub const fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Returns the timezone the event is scheduled in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Renders the event body in the Google Calendar `events.insert` shape.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({
            "summary": self.summary,
            "description": EVENT_DESCRIPTION,
            "start": {
                "dateTime": self.start.to_rfc3339_opts(SecondsFormat::Secs, false),
                "timeZone": self.timezone.name(),
            },
            "end": {
                "dateTime": self.end.to_rfc3339_opts(SecondsFormat::Secs, false),
                "timeZone": self.timezone.name(),
            },
        })
    }
}
