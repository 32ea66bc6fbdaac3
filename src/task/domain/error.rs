//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task description is empty after trimming.
    #[error("Описание задачи не может быть пустым")]
    EmptyDescription,

    /// The task identifier is not an integer.
    #[error("ID задачи должен быть числом: '{0}'")]
    InvalidTaskId(String),
}
