//! Process configuration read once at startup.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Every variable has a default so the console binary runs without any
//! setup.

use crate::schedule::{DateTimeResolver, WeekdayPolicy};
use crate::task::domain::OwnerId;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Timezone used when `TIMEZONE` is unset.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Moscow;
/// Database file used when `DATABASE_PATH` is unset.
pub const DEFAULT_DATABASE_PATH: &str = "tasks.db";
/// Owner used by the console transport when `CONSOLE_OWNER_ID` is unset.
pub const DEFAULT_CONSOLE_OWNER_ID: i64 = 1;

/// Which calendar mirror adapter to wire in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarMirrorMode {
    /// Do not mirror tasks.
    #[default]
    Disabled,
    /// Mirror into an in-process calendar.
    Memory,
}

impl FromStr for CalendarMirrorMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "disabled" | "off" | "none" => Ok(Self::Disabled),
            "memory" | "in_memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidCalendarMirror(other.to_owned())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `TIMEZONE` is not an IANA timezone identifier.
    #[error("unknown timezone '{0}'")]
    InvalidTimezone(String),

    /// `WEEKDAY_POLICY` is not a known policy.
    #[error("unknown weekday policy '{0}', expected next_occurrence or today_if_later")]
    InvalidWeekdayPolicy(String),

    /// `CALENDAR_MIRROR` is not a known mode.
    #[error("unknown calendar mirror '{0}', expected disabled or memory")]
    InvalidCalendarMirror(String),

    /// `CONSOLE_OWNER_ID` is not an integer.
    #[error("invalid console owner id '{0}'")]
    InvalidOwnerId(String),

    /// The `.env` file exists but could not be read.
    #[error("failed to load .env file: {0}")]
    DotEnv(String),
}

/// Reminder bot configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    /// Timezone dates are resolved and displayed in.
    pub timezone: Tz,
    /// Path of the SQLite database file.
    pub database_path: PathBuf,
    /// How a weekday naming the current date is resolved.
    pub weekday_policy: WeekdayPolicy,
    /// Calendar mirror adapter to use.
    pub calendar_mirror: CalendarMirrorMode,
    /// Owner the console transport acts as.
    pub console_owner_id: OwnerId,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            weekday_policy: WeekdayPolicy::default(),
            calendar_mirror: CalendarMirrorMode::default(),
            console_owner_id: OwnerId::new(DEFAULT_CONSOLE_OWNER_ID),
        }
    }
}

impl ReminderConfig {
    /// Loads `.env` when present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `.env` is unreadable or a variable holds
    /// an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::DotEnv(err.to_string())),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let timezone = read("TIMEZONE")
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ConfigError::InvalidTimezone(name))
            })
            .transpose()?
            .unwrap_or(defaults.timezone);
        let database_path = read("DATABASE_PATH").map_or(defaults.database_path, PathBuf::from);
        let weekday_policy = read("WEEKDAY_POLICY")
            .map(|name| {
                name.parse::<WeekdayPolicy>()
                    .map_err(|_| ConfigError::InvalidWeekdayPolicy(name))
            })
            .transpose()?
            .unwrap_or(defaults.weekday_policy);
        let calendar_mirror = read("CALENDAR_MIRROR")
            .map(|mode| mode.parse::<CalendarMirrorMode>())
            .transpose()?
            .unwrap_or(defaults.calendar_mirror);
        let console_owner_id = read("CONSOLE_OWNER_ID")
            .map(|raw| {
                raw.parse::<i64>()
                    .map(OwnerId::new)
                    .map_err(|_| ConfigError::InvalidOwnerId(raw))
            })
            .transpose()?
            .unwrap_or(defaults.console_owner_id);

        Ok(Self {
            timezone,
            database_path,
            weekday_policy,
            calendar_mirror,
            console_owner_id,
        })
    }

    /// Builds the resolver described by this configuration.
    #[must_use]
    pub const fn resolver(&self) -> DateTimeResolver {
        DateTimeResolver::new(self.timezone).with_weekday_policy(self.weekday_policy)
    }
}
