//! Common error types for home-software

use thiserror::Error;

/// Common result type for home-software operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the home-software crates
///
/// None of these are retried. The caller (CLI command or HTTP handler)
/// decides whether to abort the request or the whole process.
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

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Routine title does not split into exactly `<Room>/<Task>`
    #[error("Invalid routine title '{0}': expected '<Room>/<Task>'")]
    InvalidTitle(String),

    /// Stored row violates the schema's expectations (bad date, bad frequency)
    #[error("Malformed row: {0}")]
    InvalidRow(String),
}
