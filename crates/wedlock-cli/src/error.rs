//! Error types for the CLI application.

use thiserror::Error;
use wedlock_host::{ConfigError, ServiceError};
use wedlock_store::{PersistError, Rejection};

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Marriage service error
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Snapshot file could not be read or written
    #[error("Snapshot file error: {0}")]
    Persist(#[from] PersistError),

    /// The store refused the operation
    #[error("Refused: {0}")]
    Rejected(#[from] Rejection),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Line editor failure
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
