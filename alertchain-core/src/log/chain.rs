//! Hash-chained log
//!
//! Append-only sequence of [`LogEntry`]; every entry stores the digest of
//! the entry before it, so editing any stored text is detectable by
//! recomputing digests.

use std::sync::Arc;

use crate::digest::{DigestPrimitive, Sha256Digest};
use crate::error::Result;

use super::entry::LogEntry;
use super::verify::{ChainVerification, ChainVerifier};
use super::SENTINEL_DIGEST;

/// Tamper-evident, append-only log of text entries
pub struct HashChainedLog {
    /// Entries in insertion order
    entries: Vec<LogEntry>,

    /// Digest primitive used for every append and verification
    primitive: Arc<dyn DigestPrimitive>,
}

impl std::fmt::Debug for HashChainedLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashChainedLog")
            .field("entries", &self.entries)
            .field("algorithm", &self.primitive.algorithm())
            .finish()
    }
}

impl Default for HashChainedLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HashChainedLog {
    /// Create an empty SHA-256 log
    pub fn new() -> Self {
        Self::with_primitive(Arc::new(Sha256Digest))
    }

    /// Create an empty log over a custom digest primitive
    pub fn with_primitive(primitive: Arc<dyn DigestPrimitive>) -> Self {
        Self {
            entries: Vec::new(),
            primitive,
        }
    }

    /// Rebuild a log from previously exported entries
    ///
    /// The entries must form an intact chain under `primitive`; otherwise
    /// [`ChainError::ChainIntegrity`](crate::ChainError::ChainIntegrity) names the first bad entry.
    pub fn from_entries(
        entries: Vec<LogEntry>,
        primitive: Arc<dyn DigestPrimitive>,
    ) -> Result<Self> {
        ChainVerifier::verify(&entries, primitive.as_ref())?.ensure_valid()?;
        Ok(Self { entries, primitive })
    }

    /// Append `text` to the chain and return the new entry
    ///
    /// The entry links to the last entry's digest (or the sentinel when the
    /// log is empty). If the digest primitive fails nothing is pushed.
    pub fn append(&mut self, text: impl Into<String>) -> Result<&LogEntry> {
        let entry = LogEntry::link(text, self.last_digest(), self.primitive.as_ref())?;
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Owned copy of the entries; later appends are not reflected
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.clone()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Digest the next append will link to
    pub fn last_digest(&self) -> &str {
        self.entries
            .last()
            .map(|entry| entry.digest.as_str())
            .unwrap_or(SENTINEL_DIGEST)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Name of the digest algorithm in use
    pub fn algorithm(&self) -> &'static str {
        self.primitive.algorithm()
    }

    /// Verify the whole chain
    pub fn verify(&self) -> Result<ChainVerification> {
        ChainVerifier::verify(&self.entries, self.primitive.as_ref())
    }
}

impl<'a> IntoIterator for &'a HashChainedLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
