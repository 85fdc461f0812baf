//! Error types for neat_widgets

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading an artwork catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not valid TOML or has the wrong shape
    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// Catalog has no entries
    #[error("catalog has no artworks")]
    Empty,

    /// An entry is missing a required field value
    #[error("artwork {index} has an empty {field}")]
    MissingField { index: usize, field: &'static str },
}

/// Result type for neat_widgets operations
pub type Result<T> = std::result::Result<T, CatalogError>;
