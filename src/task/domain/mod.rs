//! Domain model for owner-scoped reminder tasks.
//!
//! The task domain models a single reminder record and the validated scalar
//! values it is built from, keeping storage concerns outside the domain
//! boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{ExternalEventRef, OwnerId, TaskDescription, TaskId};
pub use task::{NewTask, PersistedTaskData, Task};
