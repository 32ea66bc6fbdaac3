//! Repository port for owner-scoped task persistence.

use crate::task::domain::{ExternalEventRef, NewTask, OwnerId, Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is a self-contained unit of work and is scoped to a single
/// owner: a task is never visible to, listed for, or deletable by another
/// owner.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns the identifier assigned to it.
    ///
    /// Either the row exists with every field set or it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<TaskId>;

    /// Returns the owner's tasks due strictly after `as_of`, earliest first.
    ///
    /// Ties on the due timestamp are ordered by identifier.
    async fn list_upcoming(
        &self,
        owner_id: OwnerId,
        as_of: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier within the owner's tasks.
    ///
    /// Returns `None` when the task does not exist or belongs to another owner.
    async fn get(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<Option<Task>>;

    /// Hard-deletes a task owned by `owner_id`.
    ///
    /// The calendar reference of the removed row is read in the same atomic
    /// step as the removal.
    async fn delete(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<DeleteOutcome>;
}

/// Result of an owner-scoped delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row was removed.
    Deleted {
        /// Calendar reference stored with the removed row, if any.
        external_event_ref: Option<ExternalEventRef>,
    },
    /// No row matched the identifier and owner.
    NotFound,
}

impl DeleteOutcome {
    /// Returns whether a row was removed.
    #[must_use]
    pub const fn removed(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Returns the calendar reference of the removed row, if any.
    #[must_use]
    pub const fn external_event_ref(&self) -> Option<&ExternalEventRef> {
        match self {
            Self::Deleted { external_event_ref } => external_event_ref.as_ref(),
            Self::NotFound => None,
        }
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
