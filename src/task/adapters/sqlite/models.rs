//! Diesel row models and timestamp encoding for task persistence.

use super::schema::tasks;
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Owning chat user.
    pub owner_id: i64,
    /// Task description.
    pub description: String,
    /// Due timestamp with original offset.
    pub due_at: String,
    /// Due timestamp sort key.
    pub due_at_utc: String,
    /// Calendar mirror reference.
    pub external_event_ref: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning chat user.
    pub owner_id: i64,
    /// Task description.
    pub description: String,
    /// Due timestamp with original offset.
    pub due_at: String,
    /// Due timestamp sort key.
    pub due_at_utc: String,
    /// Calendar mirror reference.
    pub external_event_ref: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Encodes a timestamp so that parsing it back yields the same instant,
/// precision and offset.
pub fn encode_offset_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Encodes an instant as fixed-width UTC text whose lexicographic order is
/// chronological.
pub fn encode_utc_key<Z: TimeZone>(value: &DateTime<Z>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Decodes a timestamp written by [`encode_offset_timestamp`] or
/// [`encode_utc_key`].
pub fn decode_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}
