//! Error types for the fitlog_core library.

use crate::entry::Field;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field value violated its constraint
    #[error("{message}")]
    Validation { field: Field, message: String },

    /// A stored line could not be turned into an entry
    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller passed an argument the operation cannot accept
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Position outside the collection
    #[error("Invalid entry position {position} (have {len} entries)")]
    InvalidPosition { position: usize, len: usize },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The offending field, if this is a validation error
    pub fn field(&self) -> Option<Field> {
        match self {
            Error::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}
