//! Owner scoping of repository queries.

use crate::sqlite::helpers::{TestDatabase, database, new_task};
use crate::clock_helpers::timestamp;
use rstest::rstest;
use taskbot::task::domain::OwnerId;
use taskbot::task::ports::{DeleteOutcome, TaskRepository};

const ALICE: i64 = 100;
const BOB: i64 = 200;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_tasks_are_invisible(database: TestDatabase) {
    let id = database
        .repo
        .create(&new_task(ALICE, "alice only", "2030-01-01T09:00:00+03:00"))
        .await
        .expect("create task");

    let as_bob = database
        .repo
        .get(id, OwnerId::new(BOB))
        .await
        .expect("get as bob");
    let bob_upcoming = database
        .repo
        .list_upcoming(OwnerId::new(BOB), timestamp("2024-01-01T00:00:00Z").to_utc())
        .await
        .expect("list as bob");

    assert!(as_bob.is_none());
    assert!(bob_upcoming.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_delete_leaves_the_task_in_place(database: TestDatabase) {
    let id = database
        .repo
        .create(&new_task(ALICE, "keep me", "2030-01-01T09:00:00+03:00"))
        .await
        .expect("create task");

    let outcome = database
        .repo
        .delete(id, OwnerId::new(BOB))
        .await
        .expect("delete as bob");

    assert_eq!(outcome, DeleteOutcome::NotFound);
    assert!(
        database
            .repo
            .get(id, OwnerId::new(ALICE))
            .await
            .expect("get as alice")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upcoming_lists_only_the_callers_tasks(database: TestDatabase) {
    let alice_task = database
        .repo
        .create(&new_task(ALICE, "alice", "2030-01-01T09:00:00+03:00"))
        .await
        .expect("create alice task");
    database
        .repo
        .create(&new_task(BOB, "bob", "2030-01-01T08:00:00+03:00"))
        .await
        .expect("create bob task");

    let upcoming = database
        .repo
        .list_upcoming(
            OwnerId::new(ALICE),
            timestamp("2024-01-01T00:00:00Z").to_utc(),
        )
        .await
        .expect("list as alice");

    assert_eq!(upcoming.len(), 1);
    assert!(upcoming.iter().all(|task| task.id() == alice_task));
}
