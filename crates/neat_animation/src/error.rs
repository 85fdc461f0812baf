//! Error types for neat_animation

use thiserror::Error;

/// Errors produced while parsing SVG path data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A character that is neither a command, a number nor a separator
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A number token that does not parse as f32
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Numbers appeared before any command
    #[error("path data must start with a command")]
    MissingCommand,

    /// A command received an argument count that is not a multiple of its arity
    #[error("command '{command}' expects {expected} arguments per segment, found {found}")]
    ArgumentCount {
        command: char,
        expected: usize,
        found: usize,
    },
}

/// Result type for neat_animation operations
pub type Result<T> = std::result::Result<T, PathError>;
