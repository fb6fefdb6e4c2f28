//! Hash chain verification
//!
//! Recomputes every digest and checks every link so that any retroactive
//! edit to a stored entry is reported with the index where the chain first
//! goes wrong.

use serde::{Deserialize, Serialize};

use crate::digest::DigestPrimitive;
use crate::error::{ChainError, Result};

use super::entry::LogEntry;
use super::SENTINEL_DIGEST;

/// Result of verifying a hash chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    /// Whether the chain is valid
    pub is_valid: bool,

    /// Total number of entries examined
    pub entry_count: usize,

    /// Index of first invalid entry (if any)
    pub first_invalid_index: Option<usize>,

    /// Type of error if chain is invalid
    pub error_type: Option<ChainErrorType>,

    /// Human-readable error message
    pub error_message: Option<String>,

    /// Digest of the last entry that verified (sentinel if none did)
    pub last_valid_digest: Option<String>,
}

impl ChainVerification {
    /// Create a valid verification result
    pub fn valid(entry_count: usize, last_digest: String) -> Self {
        Self {
            is_valid: true,
            entry_count,
            first_invalid_index: None,
            error_type: None,
            error_message: None,
            last_valid_digest: Some(last_digest),
        }
    }

    /// Create an invalid verification result
    pub fn invalid(
        entry_count: usize,
        index: usize,
        error_type: ChainErrorType,
        message: String,
        last_valid_digest: String,
    ) -> Self {
        Self {
            is_valid: false,
            entry_count,
            first_invalid_index: Some(index),
            error_type: Some(error_type),
            error_message: Some(message),
            last_valid_digest: Some(last_valid_digest),
        }
    }

    /// Verification of an empty chain (valid, nothing examined)
    pub fn empty() -> Self {
        Self::valid(0, SENTINEL_DIGEST.to_string())
    }

    /// Turn an invalid result into [`ChainError::ChainIntegrity`]
    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_valid {
            return Ok(());
        }

        let kind = self
            .error_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "invalid".to_string());
        let reason = match &self.error_message {
            Some(message) => format!("{}: {}", kind, message),
            None => kind,
        };
        Err(ChainError::ChainIntegrity {
            index: self.first_invalid_index.unwrap_or_default(),
            reason,
        })
    }
}

/// Types of chain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainErrorType {
    /// Stored digest doesn't match a recomputation from text and previous digest
    HashMismatch,
    /// Entry's previous_digest doesn't match the digest of the entry before it
    ChainBroken,
    /// First entry doesn't link to the sentinel
    InvalidGenesis,
}

impl std::fmt::Display for ChainErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainErrorType::HashMismatch => write!(f, "hash_mismatch"),
            ChainErrorType::ChainBroken => write!(f, "chain_broken"),
            ChainErrorType::InvalidGenesis => write!(f, "invalid_genesis"),
        }
    }
}

/// Hash chain verifier
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain of entries
    ///
    /// For each entry, in order:
    /// 1. It links to the previous entry's digest (the sentinel for entry 0)
    /// 2. Its digest recomputes from `text ++ previous_digest`
    ///
    /// Stops at the first failure. Returns `Err` only if the digest
    /// primitive itself fails.
    pub fn verify(
        entries: &[LogEntry],
        primitive: &dyn DigestPrimitive,
    ) -> Result<ChainVerification> {
        if entries.is_empty() {
            return Ok(ChainVerification::empty());
        }

        let mut expected_previous = SENTINEL_DIGEST;

        for (i, entry) in entries.iter().enumerate() {
            if entry.previous_digest != expected_previous {
                let (error_type, message) = if i == 0 {
                    (
                        ChainErrorType::InvalidGenesis,
                        format!(
                            "First entry previous_digest should be '{}', got: {}",
                            SENTINEL_DIGEST, entry.previous_digest
                        ),
                    )
                } else {
                    (
                        ChainErrorType::ChainBroken,
                        format!(
                            "Entry {} previous_digest {} doesn't match previous entry digest {}",
                            i, entry.previous_digest, expected_previous
                        ),
                    )
                };
                return Ok(ChainVerification::invalid(
                    entries.len(),
                    i,
                    error_type,
                    message,
                    expected_previous.to_string(),
                ));
            }

            let computed = entry.compute_digest(primitive)?;
            if entry.digest != computed {
                return Ok(ChainVerification::invalid(
                    entries.len(),
                    i,
                    ChainErrorType::HashMismatch,
                    format!(
                        "Entry {} digest mismatch: stored {}, computed {}",
                        i, entry.digest, computed
                    ),
                    expected_previous.to_string(),
                ));
            }

            expected_previous = &entry.digest;
        }

        Ok(ChainVerification::valid(
            entries.len(),
            expected_previous.to_string(),
        ))
    }

    /// Verify that `extension` continues where `base` ends
    ///
    /// An extension of an empty base must start at the sentinel.
    pub fn verify_extension(base: &[LogEntry], extension: &[LogEntry]) -> bool {
        let Some(first_extension) = extension.first() else {
            return false;
        };

        let expected = base
            .last()
            .map(|entry| entry.digest.as_str())
            .unwrap_or(SENTINEL_DIGEST);

        first_extension.previous_digest == expected
    }

    /// Find the point where two chains diverge
    ///
    /// Returns the index of the first differing entry, or None if chains are identical.
    pub fn find_divergence(chain_a: &[LogEntry], chain_b: &[LogEntry]) -> Option<usize> {
        let min_len = chain_a.len().min(chain_b.len());

        if let Some(i) = (0..min_len).find(|&i| chain_a[i].digest != chain_b[i].digest) {
            return Some(i);
        }

        if chain_a.len() != chain_b.len() {
            Some(min_len)
        } else {
            None
        }
    }
}
