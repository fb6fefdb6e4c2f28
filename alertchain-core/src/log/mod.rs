//! Hash-chained alert log
//!
//! Each entry's digest is `Hash(text ++ previous_digest)`; the first entry
//! links to [`SENTINEL_DIGEST`].
//!
//! ```text
//!  "0" ──▶ [ text₀ | prev="0"  | d₀ ] ──▶ [ text₁ | prev=d₀ | d₁ ] ──▶ ...
//! ```

mod chain;
mod entry;
mod verify;

pub use chain::HashChainedLog;
pub use entry::LogEntry;
pub use verify::{ChainErrorType, ChainVerification, ChainVerifier};

/// Predecessor digest of the first entry
pub const SENTINEL_DIGEST: &str = "0";
