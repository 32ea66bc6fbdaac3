//! Error types for chat command parsing and routing.

use crate::task::services::ReminderError;
use thiserror::Error;

/// Errors raised while splitting chat text into a command invocation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandParseError {
    /// Input was empty or whitespace only.
    #[error("command input cannot be empty")]
    EmptyInput,

    /// Input does not start with `/`.
    #[error("commands must start with '/'")]
    MissingLeadingSlash,

    /// Command name contains characters outside `[A-Za-z0-9_]`.
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),
}

/// Errors that stop the router from producing a regular reply.
#[derive(Debug, Error)]
pub enum RouterError {
    /// A reply template failed to compile or render.
    #[error("reply template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The reminder service failed for a reason other than bad input.
    #[error(transparent)]
    Service(#[from] ReminderError),
}
