//! Service layer orchestrating date resolution, calendar mirroring and the
//! task store.

use crate::calendar::{CalendarEvent, CalendarMirror};
use crate::schedule::{DateTimeResolver, ResolveError};
use crate::task::{
    domain::{ExternalEventRef, NewTask, OwnerId, Task, TaskDescription, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for adding a task from chat tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    owner_id: OwnerId,
    description: String,
    date_token: String,
    time_token: String,
}

impl AddTaskRequest {
    /// Creates a request from the raw description and date/time tokens.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        description: impl Into<String>,
        date_token: impl Into<String>,
        time_token: impl Into<String>,
    ) -> Self {
        Self {
            owner_id,
            description: description.into(),
            date_token: date_token.into(),
            time_token: time_token.into(),
        }
    }
}

/// Outcome of a calendar mirror interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorStatus {
    /// The mirror is disabled or had nothing to sync.
    NotRequested,
    /// The calendar accepted the change.
    Synced,
    /// The calendar call failed; the local change was still applied.
    Failed(String),
}

impl MirrorStatus {
    /// Returns the canonical status label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Synced => "synced",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns whether the calendar call failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A stored task together with the calendar outcome of its creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedTask {
    /// The persisted task.
    pub task: Task,
    /// Result of mirroring the task into the calendar.
    pub mirror: MirrorStatus,
}

/// Result of deleting a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTask {
    /// Identifier the caller asked to delete.
    pub task_id: TaskId,
    /// Whether a row owned by the caller was removed.
    pub removed: bool,
    /// Calendar reference stored with the removed row.
    pub external_event_ref: Option<ExternalEventRef>,
    /// Result of removing the mirrored calendar event.
    pub mirror: MirrorStatus,
}

/// Service-level errors for reminder operations.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// The date or time token could not be interpreted.
    #[error(transparent)]
    InvalidFormat(#[from] ResolveError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for reminder service operations.
pub type ReminderResult<T> = Result<T, ReminderError>;

/// Reminder orchestration service.
#[derive(Clone)]
pub struct ReminderService<R, M, C>
where
    R: TaskRepository,
    M: CalendarMirror,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    mirror: Arc<M>,
    clock: Arc<C>,
    resolver: DateTimeResolver,
}

impl<R, M, C> ReminderService<R, M, C>
where
    R: TaskRepository,
    M: CalendarMirror,
    C: Clock + Send + Sync,
{
    /// Creates a new reminder service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        mirror: Arc<M>,
        clock: Arc<C>,
        resolver: DateTimeResolver,
    ) -> Self {
        Self {
            repository,
            mirror,
            clock,
            resolver,
        }
    }

    /// Returns the resolver used for chat tokens.
    #[must_use]
    pub const fn resolver(&self) -> &DateTimeResolver {
        &self.resolver
    }

    /// Returns the configured timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.resolver.timezone()
    }

    /// Returns the current instant in the configured timezone.
    #[must_use]
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.utc().with_timezone(&self.resolver.timezone())
    }

    /// Returns whether calendar mirroring is enabled.
    #[must_use]
    pub fn calendar_enabled(&self) -> bool {
        self.mirror.is_enabled()
    }

    /// Resolves the request tokens and stores a new task.
    ///
    /// The calendar mirror is asked for an event first so its reference can
    /// be stored with the row. A mirror failure is reported through
    /// [`AddedTask::mirror`] and does not stop the task from being stored.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Domain`] for an empty description,
    /// [`ReminderError::InvalidFormat`] when the tokens cannot be resolved,
    /// and [`ReminderError::Repository`] when storing fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> ReminderResult<AddedTask> {
        let description = TaskDescription::new(request.description)?;
        let due_at = self
            .resolver
            .resolve(&request.date_token, &request.time_token, &self.now())?
            .fixed_offset();

        let (event_ref, mirror) = self.mirror_new_task(&description, due_at).await;

        let mut new_task = NewTask::new(request.owner_id, description, due_at, &*self.clock);
        if let Some(reference) = event_ref.clone() {
            new_task = new_task.with_external_event_ref(reference);
        }

        let id = match self.repository.create(&new_task).await {
            Ok(id) => id,
            Err(err) => {
                if let Some(reference) = event_ref {
                    self.discard_orphan_event(&reference).await;
                }
                return Err(err.into());
            }
        };

        info!(
            task_id = %id,
            owner_id = %request.owner_id,
            due_at = %due_at,
            mirror = mirror.as_str(),
            "task added"
        );
        Ok(AddedTask {
            task: new_task.into_task(id),
            mirror,
        })
    }

    /// Lists the owner's tasks due after the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Repository`] when the lookup fails.
    pub async fn upcoming(&self, owner_id: OwnerId) -> ReminderResult<Vec<Task>> {
        let tasks = self
            .repository
            .list_upcoming(owner_id, self.clock.utc())
            .await?;
        Ok(tasks)
    }

    /// Lists the owner's upcoming tasks that fall on the current date in the
    /// configured timezone.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Repository`] when the lookup fails.
    pub async fn today(&self, owner_id: OwnerId) -> ReminderResult<Vec<Task>> {
        let now = self.now();
        let today = now.date_naive();
        let tasks = self
            .repository
            .list_upcoming(owner_id, now.to_utc())
            .await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.falls_on(today, &now.timezone()))
            .collect())
    }

    /// Finds one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Repository`] when the lookup fails.
    pub async fn get(&self, owner_id: OwnerId, id: TaskId) -> ReminderResult<Option<Task>> {
        Ok(self.repository.get(id, owner_id).await?)
    }

    /// Deletes one of the owner's tasks and removes its mirrored event.
    ///
    /// A task that does not exist or belongs to another owner is reported
    /// with `removed == false`. Calendar cleanup failures are reported
    /// through [`DeletedTask::mirror`].
    ///
    /// # Errors
    ///
    /// Returns [`ReminderError::Repository`] when the delete fails.
    pub async fn delete_task(&self, owner_id: OwnerId, id: TaskId) -> ReminderResult<DeletedTask> {
        let outcome = self.repository.delete(id, owner_id).await?;
        let removed = outcome.removed();
        let external_event_ref = outcome.external_event_ref().cloned();

        let mirror = match &external_event_ref {
            Some(reference) if self.mirror.is_enabled() => {
                match self.mirror.delete_event(reference).await {
                    Ok(()) => MirrorStatus::Synced,
                    Err(err) => {
                        warn!(
                            task_id = %id,
                            event_ref = %reference,
                            error = %err,
                            "calendar event cleanup failed"
                        );
                        MirrorStatus::Failed(err.to_string())
                    }
                }
            }
            _ => MirrorStatus::NotRequested,
        };

        if removed {
            info!(task_id = %id, owner_id = %owner_id, mirror = mirror.as_str(), "task deleted");
        }
        Ok(DeletedTask {
            task_id: id,
            removed,
            external_event_ref,
            mirror,
        })
    }

    async fn mirror_new_task(
        &self,
        description: &TaskDescription,
        due_at: DateTime<FixedOffset>,
    ) -> (Option<ExternalEventRef>, MirrorStatus) {
        if !self.mirror.is_enabled() {
            return (None, MirrorStatus::NotRequested);
        }

        let event = CalendarEvent::for_task(description.as_str(), due_at, self.timezone());
        match self.mirror.create_event(&event).await {
            Ok(Some(reference)) => (Some(reference), MirrorStatus::Synced),
            Ok(None) => (None, MirrorStatus::NotRequested),
            Err(err) => {
                warn!(error = %err, "calendar event creation failed");
                (None, MirrorStatus::Failed(err.to_string()))
            }
        }
    }

    async fn discard_orphan_event(&self, reference: &ExternalEventRef) {
        if let Err(err) = self.mirror.delete_event(reference).await {
            warn!(
                event_ref = %reference,
                error = %err,
                "failed to remove calendar event for unsaved task"
            );
        }
    }
}
