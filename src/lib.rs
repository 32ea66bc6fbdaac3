//! Taskbot: a chat-driven personal task reminder.
//!
//! Users send short commands such as `/add Встреча пн 14.30` to create, list
//! and delete time-stamped tasks. Loosely formatted date and time tokens are
//! resolved into absolute timestamps, stored per user, and optionally
//! mirrored into an external calendar.
//!
//! # Architecture
//!
//! Taskbot follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, calendar)
//!
//! # Modules
//!
//! - [`schedule`]: Date/time token resolution
//! - [`task`]: Task records, storage and the reminder service
//! - [`calendar`]: Best-effort calendar mirroring
//! - [`command`]: Chat command dispatch and reply rendering
//! - [`config`]: Startup configuration

pub mod calendar;
pub mod command;
pub mod config;
pub mod schedule;
pub mod task;

#[cfg(test)]
mod test_support;
