//! Best-effort mirroring of tasks into an external calendar.
//!
//! Local task storage is the source of truth. The mirror is asked to create
//! an event after a task is resolved and to delete it after the task is
//! removed; its failures are reported but never undo a store mutation.
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

pub use domain::CalendarEvent;
pub use ports::{CalendarMirror, CalendarMirrorError, CalendarMirrorResult};
