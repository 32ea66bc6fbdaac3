//! Chat command parser.

use super::CommandParseError;

/// A parsed `/command arg arg…` chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    name: String,
    args: Vec<String>,
}

impl CommandInvocation {
    /// Parses `/<command>[@bot] arg1 arg2 …` input.
    ///
    /// The command name is lower-cased and any `@botname` suffix is dropped.
    /// Arguments are split on whitespace and kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CommandParseError`] when the input is empty, lacks the
    /// leading slash, or names a command with invalid characters.
    pub fn parse(raw_input: &str) -> Result<Self, CommandParseError> {
        let mut tokens = raw_input.split_whitespace();
        let command_token = tokens.next().ok_or(CommandParseError::EmptyInput)?;
        let name = parse_command_token(command_token)?;

        Ok(Self {
            name,
            args: tokens.map(str::to_owned).collect(),
        })
    }

    /// Returns the command name without the leading slash.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the whitespace-separated arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn parse_command_token(token: &str) -> Result<String, CommandParseError> {
    let command = token
        .strip_prefix('/')
        .ok_or(CommandParseError::MissingLeadingSlash)?;
    let name = command
        .split_once('@')
        .map_or(command, |(name, _bot)| name);
    if name.is_empty() || !is_valid_name(name) {
        return Err(CommandParseError::InvalidCommandName(name.to_owned()));
    }
    Ok(name.to_ascii_lowercase())
}

fn is_valid_name(value: &str) -> bool {
    value
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || character == '_')
}
