//! Mirror used when no calendar is configured.

use crate::calendar::{CalendarEvent, CalendarMirror, CalendarMirrorError, CalendarMirrorResult};
use crate::task::domain::ExternalEventRef;
use async_trait::async_trait;

/// Calendar mirror that never syncs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCalendarMirror;

#[async_trait]
impl CalendarMirror for DisabledCalendarMirror {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn create_event(
        &self,
        _event: &CalendarEvent,
    ) -> CalendarMirrorResult<Option<ExternalEventRef>> {
        Ok(None)
    }

    async fn delete_event(&self, _reference: &ExternalEventRef) -> CalendarMirrorResult<()> {
        Err(CalendarMirrorError::Unavailable(
            "calendar mirror is disabled".to_owned(),
        ))
    }
}
