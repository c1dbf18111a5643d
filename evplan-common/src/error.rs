//! Common error types for evplan

use thiserror::Error;

/// Common result type for evplan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the evplan crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unique constraint rejected an insert (participant email)
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Map a failed insert to [`Error::DuplicateKey`] when SQLite reports a
    /// unique constraint violation, otherwise keep it as a database error.
    pub fn from_insert(err: sqlx::Error, key: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::DuplicateKey(key.into())
            }
            _ => Error::Database(err),
        }
    }

    /// True for the per-call constraint failure callers may report and move past
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::DuplicateKey(_))
    }
}
