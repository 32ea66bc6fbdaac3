//! Port contract for calendar mirroring.

use super::CalendarEvent;
use crate::task::domain::ExternalEventRef;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for calendar mirror operations.
pub type CalendarMirrorResult<T> = Result<T, CalendarMirrorError>;

/// Best-effort synchronisation of tasks into an external calendar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarMirror: Send + Sync {
    /// Returns whether the mirror is configured to sync at all.
    fn is_enabled(&self) -> bool;

    /// Creates an event and returns its reference.
    ///
    /// Returns `None` when the service accepted the request without
    /// producing a reference.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarMirrorError`] when the calendar cannot be reached or
    /// rejects the event.
    async fn create_event(
        &self,
        event: &CalendarEvent,
    ) -> CalendarMirrorResult<Option<ExternalEventRef>>;

    /// Deletes a previously created event.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarMirrorError`] when the calendar cannot be reached or
    /// does not know the event.
    async fn delete_event(&self, reference: &ExternalEventRef) -> CalendarMirrorResult<()>;
}

/// Errors returned by calendar mirror implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarMirrorError {
    /// The mirror is disabled or the calendar service is unreachable.
    #[error("calendar unavailable: {0}")]
    Unavailable(String),

    /// The calendar does not know the referenced event.
    #[error("calendar event not found: {0}")]
    EventNotFound(ExternalEventRef),
}
