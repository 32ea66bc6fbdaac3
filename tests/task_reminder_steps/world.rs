//! Shared world state for task reminder BDD scenarios.

use crate::clock_helpers::FixedClock;
use chrono_tz::Tz;
use rstest::fixture;
use std::sync::Arc;
use taskbot::calendar::adapters::InMemoryCalendarMirror;
use taskbot::command::{CommandRouter, Reply};
use taskbot::schedule::DateTimeResolver;
use taskbot::task::adapters::memory::InMemoryTaskRepository;
use taskbot::task::services::ReminderService;

/// Router type used by the BDD world.
pub type TestRouter = CommandRouter<InMemoryTaskRepository, InMemoryCalendarMirror, FixedClock>;

/// Scenario world for task reminder behaviour tests.
pub struct TaskReminderWorld {
    pub router: Option<TestRouter>,
    pub mirror: Arc<InMemoryCalendarMirror>,
    pub last_reply: Option<Reply>,
}

impl TaskReminderWorld {
    /// Wires a fresh router in `timezone` pinned to `now`.
    pub fn start_bot(&mut self, timezone: Tz, now: &str) -> Result<(), eyre::Report> {
        let service = ReminderService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&self.mirror),
            Arc::new(FixedClock::at(now)),
            DateTimeResolver::new(timezone),
        );
        self.router = Some(CommandRouter::new(service)?);
        Ok(())
    }

    /// Returns the running router.
    pub fn router(&self) -> Result<&TestRouter, eyre::Report> {
        self.router
            .as_ref()
            .ok_or_else(|| eyre::eyre!("bot has not been started in scenario world"))
    }

    /// Returns the most recent reply.
    pub fn last_reply(&self) -> Result<&Reply, eyre::Report> {
        self.last_reply
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no reply recorded in scenario world"))
    }
}

impl Default for TaskReminderWorld {
    fn default() -> Self {
        Self {
            router: None,
            mirror: Arc::new(InMemoryCalendarMirror::new()),
            last_reply: None,
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskReminderWorld {
    TaskReminderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
