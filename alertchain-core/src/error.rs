//! Error types for alertchain core operations
//!
//! Every variant carries a stable error code, so callers (the runtime, the
//! dashboard binary) can log and branch on failures without matching on
//! message text.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, ChainError>;

/// Errors that can occur in core operations
#[derive(Error, Debug)]
pub enum ChainError {
    /// The digest primitive is missing or refused to hash the input
    #[error("Digest primitive '{algorithm}' unavailable: {reason}")]
    DigestUnavailable { algorithm: String, reason: String },

    /// A chain failed verification where the caller required it to be intact
    #[error("Chain integrity error at entry {index}: {reason}")]
    ChainIntegrity { index: usize, reason: String },
}

impl ChainError {
    /// Build a `DigestUnavailable` error
    pub fn digest_unavailable(algorithm: impl Into<String>, reason: impl Into<String>) -> Self {
        ChainError::DigestUnavailable {
            algorithm: algorithm.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error might succeed on retry
    ///
    /// A digest failure may be transient (an external primitive can come
    /// back); a broken chain never repairs itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChainError::DigestUnavailable { .. })
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ChainError::DigestUnavailable { .. } => "DIGEST_UNAVAILABLE",
            ChainError::ChainIntegrity { .. } => "CHAIN_INTEGRITY_ERROR",
        }
    }
}
