//! Log entry type

use serde::{Deserialize, Serialize};

use crate::digest::DigestPrimitive;
use crate::error::Result;

use super::SENTINEL_DIGEST;

/// A single entry in the hash-chained alert log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Human-readable event description
    pub text: String,

    /// Digest of the preceding entry, or the sentinel for the first entry
    pub previous_digest: String,

    /// Lowercase hex digest of `text ++ previous_digest`
    pub digest: String,
}

impl LogEntry {
    /// Create an entry linked to `previous_digest`, computing its digest
    pub fn link(
        text: impl Into<String>,
        previous_digest: impl Into<String>,
        primitive: &dyn DigestPrimitive,
    ) -> Result<Self> {
        let text = text.into();
        let previous_digest = previous_digest.into();
        let digest = primitive.digest_hex(&digest_input(&text, &previous_digest))?;

        Ok(Self {
            text,
            previous_digest,
            digest,
        })
    }

    /// Recompute the digest from `text` and `previous_digest`
    ///
    /// The input is the text immediately followed by the previous digest,
    /// with no separator.
    pub fn compute_digest(&self, primitive: &dyn DigestPrimitive) -> Result<String> {
        primitive.digest_hex(&digest_input(&self.text, &self.previous_digest))
    }

    /// Check that the stored digest matches a fresh computation
    pub fn verify_digest(&self, primitive: &dyn DigestPrimitive) -> Result<bool> {
        Ok(self.digest == self.compute_digest(primitive)?)
    }

    /// Whether this entry links to the sentinel (i.e. it opens a chain)
    pub fn is_first(&self) -> bool {
        self.previous_digest == SENTINEL_DIGEST
    }

    /// Display form of the digest: the first `len` characters then `...`
    ///
    /// Presentation only; the stored digest is never shortened.
    pub fn digest_preview(&self, len: usize) -> String {
        let prefix: String = self.digest.chars().take(len).collect();
        format!("{}...", prefix)
    }
}

fn digest_input(text: &str, previous_digest: &str) -> Vec<u8> {
    let mut data = Vec::with_capacity(text.len() + previous_digest.len());
    data.extend_from_slice(text.as_bytes());
    data.extend_from_slice(previous_digest.as_bytes());
    data
}
