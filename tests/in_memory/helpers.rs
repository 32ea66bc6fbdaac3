//! Shared test helpers for in-memory integration tests.

use crate::clock_helpers::FixedClock;
use chrono_tz::Tz;
use rstest::fixture;
use std::sync::Arc;
use taskbot::calendar::adapters::InMemoryCalendarMirror;
use taskbot::command::CommandRouter;
use taskbot::schedule::{DateTimeResolver, WeekdayPolicy};
use taskbot::task::adapters::memory::InMemoryTaskRepository;
use taskbot::task::services::ReminderService;

/// Wednesday 2024-01-10, 10:00 in Moscow.
pub const WEDNESDAY_MORNING: &str = "2024-01-10T10:00:00+03:00";

/// Service type used by in-memory integration tests.
pub type TestService = ReminderService<InMemoryTaskRepository, InMemoryCalendarMirror, FixedClock>;

/// Router type used by in-memory integration tests.
pub type TestRouter = CommandRouter<InMemoryTaskRepository, InMemoryCalendarMirror, FixedClock>;

/// A service together with a handle on its calendar mirror.
pub struct ServiceHarness {
    pub service: TestService,
    pub mirror: Arc<InMemoryCalendarMirror>,
}

/// Builds a service in `timezone` pinned to the instant `now`.
pub fn service_at(now: &str, timezone: Tz, weekday_policy: WeekdayPolicy) -> ServiceHarness {
    let mirror = Arc::new(InMemoryCalendarMirror::new());
    let service = ReminderService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&mirror),
        Arc::new(FixedClock::at(now)),
        DateTimeResolver::new(timezone).with_weekday_policy(weekday_policy),
    );
    ServiceHarness { service, mirror }
}

/// Provides a Moscow service on Wednesday morning with the default policy.
#[fixture]
pub fn moscow() -> ServiceHarness {
    service_at(
        WEDNESDAY_MORNING,
        chrono_tz::Europe::Moscow,
        WeekdayPolicy::NextOccurrence,
    )
}

/// A router together with a handle on its calendar mirror.
pub struct RouterHarness {
    pub router: TestRouter,
    pub mirror: Arc<InMemoryCalendarMirror>,
}

/// Provides a Moscow router on Wednesday morning with the default policy.
#[fixture]
pub fn chat() -> RouterHarness {
    let ServiceHarness { service, mirror } = moscow();
    let router = CommandRouter::new(service).expect("reply templates compile");
    RouterHarness { router, mirror }
}
