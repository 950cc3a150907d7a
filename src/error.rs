//! Error types for lapse.

use thiserror::Error;

/// Errors that can occur in lapse.
#[derive(Error, Debug)]
pub enum LapseError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A session or other item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation was called in a state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A session edit would break the `end > start` invariant.
    #[error("Invalid edit: {0}")]
    InvalidEdit(String),

    /// The terminal UI could not be driven.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<serde_json::Error> for LapseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for LapseError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl LapseError {
    /// Whether this error reflects a caller contract violation rather than a
    /// runtime failure.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}
