//! In-memory calendar mirror for tests and offline runs.

use crate::calendar::{CalendarEvent, CalendarMirror, CalendarMirrorError, CalendarMirrorResult};
use crate::task::domain::ExternalEventRef;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Thread-safe calendar mirror that keeps event payloads in memory.
///
/// References are assigned as `evt-1`, `evt-2`, and so on. The mirror can be
/// switched to an unavailable state to exercise degraded sync paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarMirror {
    state: Arc<RwLock<MirrorState>>,
}

#[derive(Debug, Default)]
struct MirrorState {
    last_event: u64,
    events: BTreeMap<ExternalEventRef, Value>,
    unavailable: bool,
}

impl InMemoryCalendarMirror {
    /// Creates an empty, available mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail with [`CalendarMirrorError::Unavailable`]
    /// until availability is restored.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut state) = self.state.write() {
            state.unavailable = unavailable;
        }
    }

    /// Returns the stored payload for `reference`, if the event exists.
    #[must_use]
    pub fn event_payload(&self, reference: &ExternalEventRef) -> Option<Value> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.events.get(reference).cloned())
    }

    /// Returns the number of events currently mirrored.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.events.len())
    }
}

fn lock_error(err: impl std::fmt::Display) -> CalendarMirrorError {
    CalendarMirrorError::Unavailable(err.to_string())
}

fn ensure_available(state: &MirrorState) -> CalendarMirrorResult<()> {
    if state.unavailable {
        return Err(CalendarMirrorError::Unavailable(
            "in-memory calendar marked unavailable".to_owned(),
        ));
    }
    Ok(())
}

#[async_trait]
impl CalendarMirror for InMemoryCalendarMirror {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn create_event(
        &self,
        event: &CalendarEvent,
    ) -> CalendarMirrorResult<Option<ExternalEventRef>> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_available(&state)?;

        state.last_event = state.last_event.saturating_add(1);
        let reference = ExternalEventRef::new(format!("evt-{}", state.last_event));
        state.events.insert(reference.clone(), event.to_payload());
        Ok(Some(reference))
    }

    async fn delete_event(&self, reference: &ExternalEventRef) -> CalendarMirrorResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        ensure_available(&state)?;

        state
            .events
            .remove(reference)
            .map(|_| ())
            .ok_or_else(|| CalendarMirrorError::EventNotFound(reference.clone()))
    }
}
