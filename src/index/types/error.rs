//! Custom error types for the dirindex crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum IndexError {
    /// An error originating from I/O operations (open, read, write, directory walk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob is structurally invalid: too short for its declared entry count,
    /// or a name offset/terminator lies outside the buffer.
    #[error("Malformed index: {0}")]
    MalformedIndex(String),
}

impl IndexError {
    /// Returns `true` for structural violations found while decoding.
    pub fn is_malformed(&self) -> bool {
        matches!(self, IndexError::MalformedIndex(_))
    }
}

impl From<walkdir::Error> for IndexError {
    fn from(err: walkdir::Error) -> Self {
        IndexError::Io(err.into())
    }
}

/// A convenience `Result` type alias using the crate's `IndexError` type.
pub type Result<T> = std::result::Result<T, IndexError>;
