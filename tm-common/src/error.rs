//! Common error types for Top Movies

use thiserror::Error;

/// Common result type for Top Movies operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store, configuration and web layers
#[derive(Error, Debug)]
pub enum Error {
    /// Requested record does not exist (or the id could not be parsed)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Insert collided with an existing unique title
    #[error("Duplicate title: {0}")]
    Duplicate(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Map an insert failure, turning unique-constraint hits into `Duplicate`
    pub fn from_insert(err: sqlx::Error, title: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::Duplicate(title.to_string())
            }
            _ => Error::Database(err),
        }
    }
}
