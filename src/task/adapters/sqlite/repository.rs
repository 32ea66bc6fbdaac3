//! `SQLite` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow, decode_timestamp, encode_offset_timestamp, encode_utc_key},
    schema::tasks,
};
use crate::task::{
    domain::{
        ExternalEventRef, NewTask, OwnerId, PersistedTaskData, Task, TaskDescription, TaskId,
    },
    ports::{DeleteOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Applies per-connection `SQLite` settings when the pool hands out a
/// connection.
#[derive(Debug, Clone, Copy)]
struct SqliteConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from an existing connection pool.
    ///
    /// The caller is responsible for running [`Self::migrate`].
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database file at `database_path` and
    /// applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the path is not
    /// valid UTF-8, the pool cannot be built or migrations fail.
    pub fn open(database_path: &Path) -> TaskRepositoryResult<Self> {
        let database_url = database_path.to_str().ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "database path is not valid UTF-8: {}",
                    database_path.display()
                ),
            ))
        })?;
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .connection_customizer(Box::new(SqliteConnectionOptions))
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;

        let repository = Self::new(pool);
        repository.migrate()?;
        info!(path = %database_path.display(), "task database ready");
        Ok(repository)
    }

    /// Applies pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when a connection cannot
    /// be acquired or a migration fails.
    pub fn migrate(&self) -> TaskRepositoryResult<()> {
        let mut connection = self.pool.get().map_err(TaskRepositoryError::persistence)?;
        let applied = connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| TaskRepositoryError::Persistence(Arc::from(err)))?;
        debug!(count = applied.len(), "applied task migrations");
        Ok(())
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, new_task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let new_row = to_new_row(new_task);

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(TaskId::new(id))
        })
        .await
    }

    async fn list_upcoming(
        &self,
        owner_id: OwnerId,
        as_of: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let as_of_key = encode_utc_key(&as_of);

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id.value()))
                .filter(tasks::due_at_utc.gt(as_of_key))
                .order((tasks::due_at_utc.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn get(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .filter(tasks::owner_id.eq(owner_id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner_id: OwnerId) -> TaskRepositoryResult<DeleteOutcome> {
        self.run_blocking(move |connection| {
            // A single DELETE ... RETURNING statement reads the calendar
            // reference and removes the row atomically.
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::owner_id.eq(owner_id.value())),
            )
            .returning(tasks::external_event_ref)
            .get_result::<Option<String>>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;

            Ok(match deleted {
                Some(external_event_ref) => DeleteOutcome::Deleted {
                    external_event_ref: external_event_ref.map(ExternalEventRef::new),
                },
                None => DeleteOutcome::NotFound,
            })
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        owner_id: task.owner_id().value(),
        description: task.description().as_str().to_owned(),
        due_at: encode_offset_timestamp(&task.due_at()),
        due_at_utc: encode_utc_key(&task.due_at()),
        external_event_ref: task
            .external_event_ref()
            .map(|reference| reference.as_str().to_owned()),
        created_at: encode_utc_key(&task.created_at()),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        description: persisted_description,
        due_at: persisted_due_at,
        external_event_ref,
        created_at: persisted_created_at,
        ..
    } = row;

    let description =
        TaskDescription::new(persisted_description).map_err(TaskRepositoryError::persistence)?;
    let due_at = decode_timestamp(&persisted_due_at).map_err(TaskRepositoryError::persistence)?;
    let created_at = decode_timestamp(&persisted_created_at)
        .map_err(TaskRepositoryError::persistence)?
        .with_timezone(&Utc);

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        owner_id: OwnerId::new(owner_id),
        description,
        due_at,
        created_at,
        external_event_ref: external_event_ref.map(ExternalEventRef::new),
    }))
}
