//! Error types for parsing and printing separated values

use thiserror::Error;

/// Result type for separated-values operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or printing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A character (or end of input) appeared in a state that forbids it
    #[error("Grammar violation at {found_desc}: ...{context}", found_desc = display_found(.found))]
    Grammar {
        /// Offending character, `None` for end of input
        found: Option<char>,
        /// Last raw characters seen before the failure
        context: String,
    },

    /// A row's column count differs from the first row's count
    #[error("Column count mismatch: expected {expected} columns, got {actual}: ...{context}")]
    ColumnCountMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// A column exceeded the configured maximum length
    #[error("Column exceeds maximum length of {limit}: ...{context}")]
    ColumnTooLong { limit: usize, context: String },

    /// Invalid dialect configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// IO error from the underlying character source
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

fn display_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}
