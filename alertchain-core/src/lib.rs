//! # alertchain core
//!
//! Building blocks for a simulated security-operations dashboard:
//!
//! - **Hash-chained log**: append-only alert log where every entry stores
//!   the digest of the entry before it, making retroactive edits detectable
//! - **Digest primitive**: SHA-256 behind a small trait
//! - **Alerts**: a fixed catalog of synthetic intrusion alerts and sources
//!   that pick from it
//! - **Traffic window**: a sliding series of random packets/sec samples
//!
//! Nothing in this crate is async or logs; the `alertchain-runtime` crate
//! drives these types from timers.
//!
//! ## Example
//!
//! ```rust
//! use alertchain_core::{HashChainedLog, SENTINEL_DIGEST};
//!
//! let mut log = HashChainedLog::new();
//!
//! let first = log.append("Alert: Port Scan from 192.168.1.5").unwrap().clone();
//! assert_eq!(first.previous_digest, SENTINEL_DIGEST);
//!
//! let second = log.append("Alert: DDoS from 203.0.113.7").unwrap();
//! assert_eq!(second.previous_digest, first.digest);
//!
//! assert!(log.verify().unwrap().is_valid);
//! ```

pub mod alert;
pub mod digest;
pub mod error;
pub mod log;
pub mod traffic;

pub use alert::{
    default_catalog, Alert, AlertFeed, AlertSource, CyclingAlertSource, RandomAlertSource,
    Severity,
};
pub use digest::{sha256_hex, DigestPrimitive, Sha256Digest};
pub use error::{ChainError, Result};
pub use log::{
    ChainErrorType, ChainVerification, ChainVerifier, HashChainedLog, LogEntry, SENTINEL_DIGEST,
};
pub use traffic::TrafficWindow;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
