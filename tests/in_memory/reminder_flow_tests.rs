//! Reminder service flows over in-memory adapters.

use crate::in_memory::helpers::{ServiceHarness, moscow, service_at};
use crate::clock_helpers::timestamp;
use chrono_tz::America::New_York;
use rstest::rstest;
use taskbot::calendar::CalendarMirror;
use taskbot::schedule::{ResolveError, WeekdayPolicy};
use taskbot::task::domain::{OwnerId, TaskId};
use taskbot::task::services::{AddTaskRequest, MirrorStatus, ReminderError};

const OWNER: OwnerId = OwnerId::new(42);

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_week_of_tasks_is_listed_in_due_order(moscow: ServiceHarness) {
    let service = &moscow.service;
    for (description, date, time) in [
        ("Встреча", "пн", "14.30"),
        ("Отчёт", "ср", "9.00"),
        ("Годовщина", "9.1", "8.00"),
        ("Ужин", "10.1", "23.30"),
    ] {
        service
            .add_task(AddTaskRequest::new(OWNER, description, date, time))
            .await
            .expect("add task");
    }

    let upcoming = service.upcoming(OWNER).await.expect("list upcoming");
    let listed: Vec<_> = upcoming
        .iter()
        .map(|task| (task.description().as_str(), task.due_at()))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("Ужин", timestamp("2024-01-10T23:30:00+03:00")),
            ("Встреча", timestamp("2024-01-15T14:30:00+03:00")),
            ("Отчёт", timestamp("2024-01-17T09:00:00+03:00")),
            ("Годовщина", timestamp("2025-01-09T08:00:00+03:00")),
        ]
    );

    let today = service.today(OWNER).await.expect("list today");
    assert_eq!(today.len(), 1);
    assert!(today.iter().all(|task| task.description().as_str() == "Ужин"));
}

#[rstest]
#[case("18.00", "2024-01-10T18:00:00+03:00")]
#[case("9.00", "2024-01-17T09:00:00+03:00")]
#[tokio::test(flavor = "multi_thread")]
async fn today_if_later_policy_keeps_later_times_on_the_same_day(
    #[case] time: &str,
    #[case] expected: &str,
) {
    let harness = service_at(
        "2024-01-10T10:00:00+03:00",
        chrono_tz::Europe::Moscow,
        WeekdayPolicy::TodayIfLater,
    );

    let added = harness
        .service
        .add_task(AddTaskRequest::new(OWNER, "Планёрка", "ср", time))
        .await
        .expect("add task");

    assert_eq!(added.task.due_at(), timestamp(expected));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skipped_local_time_is_rejected_and_nothing_is_stored() {
    let harness = service_at(
        "2024-03-09T12:00:00-05:00",
        New_York,
        WeekdayPolicy::NextOccurrence,
    );

    let result = harness
        .service
        .add_task(AddTaskRequest::new(OWNER, "Gap", "10.3", "2.30"))
        .await;

    assert!(matches!(
        result,
        Err(ReminderError::InvalidFormat(
            ResolveError::NonexistentLocalTime { .. }
        ))
    ));
    assert!(harness.service.upcoming(OWNER).await.expect("list").is_empty());
    assert_eq!(harness.mirror.event_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_local_time_resolves_to_the_earlier_instant() {
    let harness = service_at(
        "2024-10-20T12:00:00-04:00",
        New_York,
        WeekdayPolicy::NextOccurrence,
    );

    let added = harness
        .service
        .add_task(AddTaskRequest::new(OWNER, "Fold", "3.11", "1.30"))
        .await
        .expect("add task");

    assert_eq!(added.task.due_at(), timestamp("2024-11-03T01:30:00-04:00"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mirrored_event_lives_and_dies_with_its_task(moscow: ServiceHarness) {
    let added = moscow
        .service
        .add_task(AddTaskRequest::new(OWNER, "Встреча", "пн", "14.30"))
        .await
        .expect("add task");
    let reference = added
        .task
        .external_event_ref()
        .cloned()
        .expect("task carries an event reference");

    let payload = moscow
        .mirror
        .event_payload(&reference)
        .expect("event exists in the calendar");
    assert_eq!(payload["summary"], "Встреча");
    assert_eq!(payload["start"]["dateTime"], "2024-01-15T14:30:00+03:00");
    assert_eq!(payload["end"]["dateTime"], "2024-01-15T15:30:00+03:00");
    assert_eq!(payload["start"]["timeZone"], "Europe/Moscow");

    let deleted = moscow
        .service
        .delete_task(OWNER, added.task.id())
        .await
        .expect("delete task");

    assert!(deleted.removed);
    assert_eq!(deleted.mirror, MirrorStatus::Synced);
    assert_eq!(moscow.mirror.event_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn calendar_outage_does_not_block_task_changes(moscow: ServiceHarness) {
    moscow.mirror.set_unavailable(true);
    let added = moscow
        .service
        .add_task(AddTaskRequest::new(OWNER, "Офлайн", "пт", "12.00"))
        .await
        .expect("add task despite outage");
    assert!(added.mirror.is_failed());
    assert!(added.task.external_event_ref().is_none());

    moscow.mirror.set_unavailable(false);
    let mirrored = moscow
        .service
        .add_task(AddTaskRequest::new(OWNER, "Онлайн", "пт", "13.00"))
        .await
        .expect("add task after recovery");
    moscow.mirror.set_unavailable(true);
    let deleted = moscow
        .service
        .delete_task(OWNER, mirrored.task.id())
        .await
        .expect("delete task despite outage");

    assert!(deleted.removed);
    assert!(deleted.mirror.is_failed());
    assert!(
        moscow
            .service
            .get(OWNER, mirrored.task.id())
            .await
            .expect("get")
            .is_none()
    );
    moscow.mirror.set_unavailable(false);
    let leftover = mirrored
        .task
        .external_event_ref()
        .cloned()
        .expect("mirrored task carries a reference");
    moscow
        .mirror
        .delete_event(&leftover)
        .await
        .expect("orphaned event remains in the calendar");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_task_reports_nothing_removed(moscow: ServiceHarness) {
    let deleted = moscow
        .service
        .delete_task(OWNER, TaskId::new(999))
        .await
        .expect("delete unknown task");

    assert!(!deleted.removed);
    assert_eq!(deleted.task_id, TaskId::new(999));
    assert_eq!(deleted.mirror, MirrorStatus::NotRequested);
}
