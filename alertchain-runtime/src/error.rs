//! Error types for the alertchain runtime

use alertchain_core::ChainError;
use thiserror::Error;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur in the runtime
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Error from the hash-chained log (digest failure, integrity)
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// The log writer task has stopped accepting requests
    #[error("Log writer is closed")]
    WriterClosed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A dashboard sink failed to accept an event
    #[error("Sink error: {0}")]
    Sink(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RuntimeError {
    /// Whether the dashboard loop can skip this failure and keep ticking
    pub fn is_skippable(&self) -> bool {
        match self {
            RuntimeError::Chain(err) => err.is_recoverable(),
            RuntimeError::Sink(_) => true,
            _ => false,
        }
    }
}
