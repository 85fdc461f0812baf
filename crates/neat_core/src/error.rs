//! Error types for neat_core

use thiserror::Error;

/// Errors produced while parsing core value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Color string was not `#rgb`, `#rrggbb` or `#rrggbbaa`
    #[error("invalid color '{0}': expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Result type for neat_core operations
pub type Result<T> = std::result::Result<T, CoreError>;
