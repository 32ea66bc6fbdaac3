//! Chat command routing.
//!
//! A single dispatch table ([`COMMANDS`]) maps command names to handlers.
//! [`CommandRouter`] parses raw chat text, calls the reminder service and
//! renders Russian replies from templates, formatting timestamps in the
//! configured timezone.

mod error;
mod parser;
mod replies;
mod router;
mod table;

pub use error::{CommandParseError, RouterError};
pub use parser::CommandInvocation;
pub use router::{CommandRouter, Reply};
pub use table::{COMMANDS, CommandKind, CommandSpec, KEYBOARD, find_command, keyboard};

#[cfg(test)]
mod tests;
