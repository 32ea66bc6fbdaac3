//! Runs the reminder bot against standard input and output.
//!
//! Usage:
//!
//! ```text
//! taskbot-console
//! ```
//!
//! Each input line is handled as one chat message from the configured owner
//! (`CONSOLE_OWNER_ID`); replies are written to stdout and logs to stderr.
//! Configuration is read from the environment and an optional `.env` file:
//!
//! ```text
//! TIMEZONE=Europe/Moscow
//! DATABASE_PATH=tasks.db
//! WEEKDAY_POLICY=next_occurrence
//! CALENDAR_MIRROR=disabled
//! CONSOLE_OWNER_ID=1
//! RUST_LOG=info
//! ```

use mockable::DefaultClock;
use std::sync::Arc;
use taskbot::calendar::CalendarMirror;
use taskbot::calendar::adapters::{DisabledCalendarMirror, InMemoryCalendarMirror};
use taskbot::command::{CommandRouter, Reply};
use taskbot::config::{CalendarMirrorMode, ReminderConfig};
use taskbot::task::adapters::sqlite::SqliteTaskRepository;
use taskbot::task::services::ReminderService;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ReminderConfig::from_env()?;
    let repository = Arc::new(SqliteTaskRepository::open(&config.database_path)?);
    info!(
        timezone = config.timezone.name(),
        weekday_policy = config.weekday_policy.as_str(),
        owner_id = %config.console_owner_id,
        "taskbot console starting"
    );

    match config.calendar_mirror {
        CalendarMirrorMode::Disabled => serve(&config, repository, DisabledCalendarMirror).await,
        CalendarMirrorMode::Memory => {
            serve(&config, repository, InMemoryCalendarMirror::new()).await
        }
    }
}

async fn serve<M: CalendarMirror>(
    config: &ReminderConfig,
    repository: Arc<SqliteTaskRepository>,
    mirror: M,
) -> Result<(), BoxError> {
    let service = ReminderService::new(
        repository,
        Arc::new(mirror),
        Arc::new(DefaultClock),
        config.resolver(),
    );
    let router = CommandRouter::new(service)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = router.handle(config.console_owner_id, &line).await;
        stdout.write_all(render(&reply).as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("taskbot console shut down cleanly");
    Ok(())
}

fn render(reply: &Reply) -> String {
    let mut output = reply.text.clone();
    output.push('\n');
    for row in reply.keyboard.iter().flatten() {
        output.push_str("[ ");
        output.push_str(&row.join(" | "));
        output.push_str(" ]\n");
    }
    output.push('\n');
    output
}
