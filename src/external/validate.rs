//! Command-name validation, applied before anything is spawned.

use std::path::Path;
use thiserror::Error;

/// Characters that would mean something to a shell.
pub const SHELL_METACHARACTERS: &[char] = &[
    ';', '&', '|', '$', '`', '(', ')', '{', '}', '<', '>', '\n', '\r',
];

/// Why a command was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandRejection {
    #[error("empty command")]
    Empty,

    #[error("invalid characters in command: {0}")]
    InvalidCharacters(String),

    #[error("relative paths not allowed: {0}")]
    RelativePath(String),
}

/// Validate an external command name.
///
/// The command must be a bare executable name or an absolute path. It may
/// not contain shell metacharacters or whitespace: arguments belong in
/// `args`, never in the command itself.
pub fn validate_command(command: &str) -> Result<(), CommandRejection> {
    if command.is_empty() {
        return Err(CommandRejection::Empty);
    }

    if command
        .chars()
        .any(|c| SHELL_METACHARACTERS.contains(&c) || c.is_whitespace())
    {
        return Err(CommandRejection::InvalidCharacters(command.to_string()));
    }

    if command.contains(['/', '\\']) && !Path::new(command).is_absolute() {
        return Err(CommandRejection::RelativePath(command.to_string()));
    }

    Ok(())
}
