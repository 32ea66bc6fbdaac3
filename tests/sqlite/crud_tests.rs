//! Create, read, list and delete round-trips against `SQLite`.

use crate::sqlite::helpers::{CREATED_AT, TestDatabase, database, new_task};
use crate::clock_helpers::timestamp;
use rstest::rstest;
use taskbot::task::domain::{ExternalEventRef, OwnerId, TaskId};
use taskbot::task::adapters::sqlite::SqliteTaskRepository;
use taskbot::task::ports::{DeleteOutcome, TaskRepository, TaskRepositoryError};

const OWNER: i64 = 42;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_reads_back_unchanged(database: TestDatabase) {
    let payload = new_task(OWNER, "Встреча с командой", "2024-01-15T14:30:00+03:00")
        .with_external_event_ref(ExternalEventRef::new("evt-7"));

    let id = database.repo.create(&payload).await.expect("create task");
    let stored = database
        .repo
        .get(id, OwnerId::new(OWNER))
        .await
        .expect("get task")
        .expect("task exists");

    assert_eq!(stored, payload.into_task(id));
    assert_eq!(stored.due_at().offset().local_minus_utc(), 3 * 3600);
    assert_eq!(stored.created_at(), timestamp(CREATED_AT).to_utc());
    assert_eq!(
        stored.external_event_ref().map(ExternalEventRef::as_str),
        Some("evt-7")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_increase_and_are_not_reused(database: TestDatabase) {
    let first = database
        .repo
        .create(&new_task(OWNER, "one", "2024-01-15T09:00:00+03:00"))
        .await
        .expect("create first");
    let second = database
        .repo
        .create(&new_task(OWNER, "two", "2024-01-15T10:00:00+03:00"))
        .await
        .expect("create second");
    assert!(second > first);

    database
        .repo
        .delete(second, OwnerId::new(OWNER))
        .await
        .expect("delete second");
    let third = database
        .repo
        .create(&new_task(OWNER, "three", "2024-01-15T11:00:00+03:00"))
        .await
        .expect("create third");

    assert!(third > second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_excludes_tasks_due_at_or_before_the_bound(database: TestDatabase) {
    let owner = OwnerId::new(OWNER);
    database
        .repo
        .create(&new_task(OWNER, "past", "2024-01-10T09:59:00+03:00"))
        .await
        .expect("create past");
    database
        .repo
        .create(&new_task(OWNER, "exactly now", "2024-01-10T10:00:00+03:00"))
        .await
        .expect("create boundary");
    let future = database
        .repo
        .create(&new_task(OWNER, "future", "2024-01-10T10:00:01+03:00"))
        .await
        .expect("create future");

    let upcoming = database
        .repo
        .list_upcoming(owner, timestamp("2024-01-10T07:00:00Z").to_utc())
        .await
        .expect("list upcoming");

    let ids: Vec<TaskId> = upcoming.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![future]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_orders_by_instant_across_offsets(database: TestDatabase) {
    // 12:00+03:00 is 09:00Z, earlier than 10:00Z even though its text sorts
    // later.
    let later = database
        .repo
        .create(&new_task(OWNER, "utc", "2024-02-01T10:00:00Z"))
        .await
        .expect("create utc task");
    let earlier = database
        .repo
        .create(&new_task(OWNER, "moscow", "2024-02-01T12:00:00+03:00"))
        .await
        .expect("create moscow task");
    let tied = database
        .repo
        .create(&new_task(OWNER, "tokyo", "2024-02-01T19:00:00+09:00"))
        .await
        .expect("create tokyo task");

    let upcoming = database
        .repo
        .list_upcoming(
            OwnerId::new(OWNER),
            timestamp("2024-01-01T00:00:00Z").to_utc(),
        )
        .await
        .expect("list upcoming");

    let ids: Vec<TaskId> = upcoming.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![earlier, later, tied]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_returns_the_calendar_reference_once(database: TestDatabase) {
    let owner = OwnerId::new(OWNER);
    let id = database
        .repo
        .create(
            &new_task(OWNER, "mirrored", "2024-01-15T14:30:00+03:00")
                .with_external_event_ref(ExternalEventRef::new("evt-1")),
        )
        .await
        .expect("create task");

    let first = database.repo.delete(id, owner).await.expect("first delete");
    let second = database.repo.delete(id, owner).await.expect("second delete");

    assert_eq!(
        first,
        DeleteOutcome::Deleted {
            external_event_ref: Some(ExternalEventRef::new("evt-1")),
        }
    );
    assert_eq!(second, DeleteOutcome::NotFound);
    assert!(
        database
            .repo
            .get(id, owner)
            .await
            .expect("get after delete")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_without_reference_reports_none(database: TestDatabase) {
    let owner = OwnerId::new(OWNER);
    let id = database
        .repo
        .create(&new_task(OWNER, "local only", "2024-01-15T14:30:00+03:00"))
        .await
        .expect("create task");

    let outcome = database.repo.delete(id, owner).await.expect("delete");

    assert!(outcome.removed());
    assert_eq!(outcome.external_event_ref(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_survive_reopening_the_database(database: TestDatabase) {
    let id = database
        .repo
        .create(&new_task(OWNER, "persisted", "2030-05-01T08:00:00+03:00"))
        .await
        .expect("create task");

    let reopened = database.reopen();
    let stored = reopened
        .get(id, OwnerId::new(OWNER))
        .await
        .expect("get from reopened repository")
        .expect("task exists after reopen");
    let next = reopened
        .create(&new_task(OWNER, "after reopen", "2030-05-02T08:00:00+03:00"))
        .await
        .expect("create after reopen");

    assert_eq!(stored.description().as_str(), "persisted");
    assert!(next > id);
}

#[cfg(unix)]
#[rstest]
fn non_utf8_database_path_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join(OsStr::from_bytes(b"tasks-\xff.db"));

    let result = SqliteTaskRepository::open(&path);

    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
    assert!(!path.exists());
    assert_eq!(
        std::fs::read_dir(dir.path()).expect("list directory").count(),
        0
    );
}
