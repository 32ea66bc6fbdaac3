//! Application services for reminder orchestration.

mod reminder;

pub use reminder::{
    AddTaskRequest, AddedTask, DeletedTask, MirrorStatus, ReminderError, ReminderResult,
    ReminderService,
};
