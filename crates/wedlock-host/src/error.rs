//! Error types for the host adapter

use crate::{ConfigError, ParseError};
use thiserror::Error;

/// Errors from starting, driving or stopping the marriage service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chat command could not be parsed
    #[error("Invalid command: {0}")]
    Command(#[from] ParseError),

    /// Background flushing was requested outside a tokio runtime
    #[error("Background flushing requires a running tokio runtime")]
    NoRuntime,

    /// The background flush task failed
    #[error("Worker error: {0}")]
    Worker(String),
}
