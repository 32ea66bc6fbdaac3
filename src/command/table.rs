//! Dispatch table of supported chat commands.

use serde::Serialize;

/// Handler selected for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Greeting with the reply keyboard.
    Start,
    /// Command reference.
    Help,
    /// Create a task from `description date time`.
    Add,
    /// List upcoming tasks.
    List,
    /// List upcoming tasks due today.
    Today,
    /// Delete a task by identifier.
    Delete,
}

/// A row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// Command name without the leading slash.
    pub name: &'static str,
    /// Invocation shown in help text.
    pub usage: &'static str,
    /// One-line description shown in help text.
    pub summary: &'static str,
    /// Whether the command is listed in help text.
    pub listed: bool,
    /// Handler the router dispatches to.
    pub kind: CommandKind,
}

/// Every command the router understands, in help order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "start",
        usage: "/start",
        summary: "Начать работу",
        listed: false,
        kind: CommandKind::Start,
    },
    CommandSpec {
        name: "add",
        usage: "/add описание дата время",
        summary: "Добавить задачу",
        listed: true,
        kind: CommandKind::Add,
    },
    CommandSpec {
        name: "list",
        usage: "/list",
        summary: "Все задачи",
        listed: true,
        kind: CommandKind::List,
    },
    CommandSpec {
        name: "today",
        usage: "/today",
        summary: "Задачи на сегодня",
        listed: true,
        kind: CommandKind::Today,
    },
    CommandSpec {
        name: "delete",
        usage: "/delete номер",
        summary: "Удалить задачу",
        listed: true,
        kind: CommandKind::Delete,
    },
    CommandSpec {
        name: "help",
        usage: "/help",
        summary: "Помощь",
        listed: true,
        kind: CommandKind::Help,
    },
];

/// Reply keyboard rows offered with the greeting.
pub const KEYBOARD: &[&[&str]] = &[&["/add", "/list"], &["/today", "/delete"], &["/help"]];

/// Looks up a command by its lower-case name.
#[must_use]
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Returns the reply keyboard as owned rows.
#[must_use]
pub fn keyboard() -> Vec<Vec<String>> {
    KEYBOARD
        .iter()
        .map(|row| row.iter().map(|&button| button.to_owned()).collect())
        .collect()
}
