//! Task record and the insertion payload it is created from.

use super::{ExternalEventRef, OwnerId, TaskDescription, TaskId};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A reminder task owned by a single chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    description: TaskDescription,
    due_at: DateTime<FixedOffset>,
    created_at: DateTime<Utc>,
    external_event_ref: Option<ExternalEventRef>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted due timestamp with its original offset.
    pub due_at: DateTime<FixedOffset>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted calendar mirror reference, if any.
    pub external_event_ref: Option<ExternalEventRef>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            description: data.description,
            due_at: data.due_at,
            created_at: data.created_at,
            external_event_ref: data.external_event_ref,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the moment the task refers to.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<FixedOffset> {
        self.due_at
    }

    /// Returns the insertion timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the calendar mirror reference, if the task was mirrored.
    #[must_use]
    pub const fn external_event_ref(&self) -> Option<&ExternalEventRef> {
        self.external_event_ref.as_ref()
    }

    /// Returns whether the task is due strictly after `as_of`.
    #[must_use]
    pub fn is_due_after(&self, as_of: DateTime<Utc>) -> bool {
        self.due_at > as_of
    }

    /// Returns whether the task falls on `date` as seen in `timezone`.
    #[must_use]
    pub fn falls_on<Z: TimeZone>(&self, date: NaiveDate, timezone: &Z) -> bool {
        self.due_at.with_timezone(timezone).date_naive() == date
    }
}

/// A task that has not been stored yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    owner_id: OwnerId,
    description: TaskDescription,
    due_at: DateTime<FixedOffset>,
    created_at: DateTime<Utc>,
    external_event_ref: Option<ExternalEventRef>,
}

impl NewTask {
    /// Creates an insertion payload stamped with the current clock time.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        description: TaskDescription,
        due_at: DateTime<FixedOffset>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            owner_id,
            description,
            due_at,
            created_at: clock.utc(),
            external_event_ref: None,
        }
    }

    /// Attaches the reference of a mirrored calendar event.
    #[must_use]
    pub fn with_external_event_ref(mut self, external_event_ref: ExternalEventRef) -> Self {
        self.external_event_ref = Some(external_event_ref);
        self
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the moment the task refers to.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<FixedOffset> {
        self.due_at
    }

    /// Returns the insertion timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the calendar mirror reference, if any.
    #[must_use]
    pub const fn external_event_ref(&self) -> Option<&ExternalEventRef> {
        self.external_event_ref.as_ref()
    }

    /// Completes the payload into a task once the store assigned `id`.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            owner_id: self.owner_id,
            description: self.description,
            due_at: self.due_at,
            created_at: self.created_at,
            external_event_ref: self.external_event_ref,
        }
    }
}
