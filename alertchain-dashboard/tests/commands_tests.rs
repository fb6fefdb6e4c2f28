//! Command tests: hashing, export and verification of chain files

use std::path::PathBuf;

use alertchain_core::{ChainError, ChainErrorType, HashChainedLog, LogEntry};
use alertchain_dashboard::commands;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("alertchain-{}-{}.json", std::process::id(), name))
}

fn sample_log() -> HashChainedLog {
    let mut log = HashChainedLog::new();
    log.append("Alert: Port Scan from 192.168.1.5").unwrap();
    log.append("Alert: DDoS from 203.0.113.7").unwrap();
    log.append("Alert: Brute Force from 172.16.0.3").unwrap();
    log
}

#[test]
fn test_hash_command() {
    assert_eq!(
        commands::hash("hello world"),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
}

#[test]
fn test_exported_chain_verifies() {
    let path = temp_path("valid");
    let log = sample_log();

    commands::export_chain(log.entries(), &path).unwrap();
    let verification = commands::verify_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(verification.is_valid);
    assert_eq!(verification.entry_count, 3);
}

#[test]
fn test_edited_export_fails_verification() {
    let path = temp_path("tampered");
    let mut entries: Vec<LogEntry> = sample_log().snapshot();
    entries[2].text = "Alert: all clear".to_string();

    commands::export_chain(&entries, &path).unwrap();
    let verification = commands::verify_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(!verification.is_valid);
    assert_eq!(verification.first_invalid_index, Some(2));
    assert_eq!(verification.error_type, Some(ChainErrorType::HashMismatch));
}

#[test]
fn test_verify_missing_file_is_error() {
    assert!(commands::verify_file(&temp_path("does-not-exist")).is_err());
}

#[test]
fn test_verify_malformed_file_is_error() {
    let path = temp_path("malformed");
    std::fs::write(&path, "{not json").unwrap();

    let result = commands::verify_file(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
}

#[test]
fn test_load_chain_continues_export() {
    let path = temp_path("resume");
    let log = sample_log();
    commands::export_chain(log.entries(), &path).unwrap();

    let mut resumed = commands::load_chain(&path).unwrap();
    std::fs::remove_file(&path).ok();
    let next = resumed.append("Alert: DDoS from 203.0.113.7").unwrap().clone();

    assert_eq!(next.previous_digest, log.last_digest());
    assert_eq!(resumed.len(), 4);
}

#[test]
fn test_load_chain_rejects_edited_export() {
    let path = temp_path("resume-tampered");
    let mut entries = sample_log().snapshot();
    entries[0].text = "Alert: nothing to see".to_string();
    commands::export_chain(&entries, &path).unwrap();

    let err = commands::load_chain(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    let chain_err = err
        .downcast_ref::<ChainError>()
        .expect("integrity failure should surface as ChainError");
    assert!(matches!(chain_err, ChainError::ChainIntegrity { index: 0, .. }));
}
