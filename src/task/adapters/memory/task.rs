//! In-memory repository for task tests and offline runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, OwnerId, Task, TaskId},
    ports::{DeleteOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn owned_by(task: &Task, owner_id: OwnerId) -> bool {
    task.owner_id() == owner_id
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| lock_error("task identifier space exhausted"))?;
        let id = TaskId::new(next_id);

        state.last_id = next_id;
        state.tasks.insert(id, new_task.clone().into_task(id));
        Ok(id)
    }

    async fn list_upcoming(
        &self,
        owner_id: OwnerId,
        as_of: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut upcoming: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| owned_by(task, owner_id) && task.is_due_after(as_of))
            .cloned()
            .collect();
        upcoming.sort_by(|left, right| {
            left.due_at()
                .cmp(&right.due_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(upcoming)
    }

    async fn get(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| owned_by(task, owner_id))
            .cloned())
    }

    async fn delete(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<DeleteOutcome> {
        let mut state = self.state.write().map_err(lock_error)?;
        let is_owned = state
            .tasks
            .get(&id)
            .is_some_and(|task| owned_by(task, owner_id));
        if !is_owned {
            return Ok(DeleteOutcome::NotFound);
        }

        let removed = state.tasks.remove(&id);
        Ok(DeleteOutcome::Deleted {
            external_event_ref: removed.and_then(|task| task.external_event_ref().cloned()),
        })
    }
}
