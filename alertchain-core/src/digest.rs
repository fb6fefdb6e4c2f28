//! Digest primitive
//!
//! The hash-chained log never calls `sha2` directly. It goes through
//! [`DigestPrimitive`] so the primitive can be swapped (or made to fail in
//! tests) without touching the chaining logic.

use sha2::{Digest, Sha256};

use crate::error::Result;

/// A one-way hash function rendered as lowercase hex
pub trait DigestPrimitive: Send + Sync {
    /// Algorithm name, used in error messages and logs
    fn algorithm(&self) -> &'static str;

    /// Hash `data` and return the digest as lowercase hexadecimal
    fn digest_hex(&self, data: &[u8]) -> Result<String>;
}

/// SHA-256 digest (64 hex characters)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestPrimitive for Sha256Digest {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn digest_hex(&self, data: &[u8]) -> Result<String> {
        Ok(sha256_bytes_hex(data))
    }
}

/// SHA-256 of raw bytes, lowercase hex
pub fn sha256_bytes_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 of user-supplied text (UTF-8 encoded), lowercase hex
pub fn sha256_hex(text: &str) -> String {
    sha256_bytes_hex(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA256 of "hello world"
        assert_eq!(
            sha256_hex("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_primitive_matches_free_function() {
        let primitive = Sha256Digest;
        let digest = primitive.digest_hex(b"Alert: DDoS from 203.0.113.7").unwrap();
        assert_eq!(digest, sha256_hex("Alert: DDoS from 203.0.113.7"));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_text_is_utf8_encoded() {
        assert_eq!(sha256_hex("🚨"), sha256_bytes_hex("🚨".as_bytes()));
    }
}
