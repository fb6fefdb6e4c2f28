//! Configuration for the alertchain runtime

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RuntimeError, RuntimeResult};

/// Env var overriding `schedule.chain_interval_ms`
pub const ENV_CHAIN_INTERVAL_MS: &str = "ALERTCHAIN_CHAIN_INTERVAL_MS";
/// Env var overriding `schedule.alert_interval_ms`
pub const ENV_ALERT_INTERVAL_MS: &str = "ALERTCHAIN_ALERT_INTERVAL_MS";
/// Env var overriding `queue.capacity`
pub const ENV_QUEUE_CAPACITY: &str = "ALERTCHAIN_QUEUE_CAPACITY";

/// Longest accepted ticker period (one day)
pub const MAX_INTERVAL_MS: u64 = 86_400_000;
/// Largest accepted writer queue
pub const MAX_QUEUE_CAPACITY: usize = 65_536;
/// Largest accepted live feed
pub const MAX_FEED_CAPACITY: usize = 10_000;
/// Largest accepted traffic window
pub const MAX_TRAFFIC_WINDOW: usize = 1_000;

/// Main dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Ticker periods
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Log writer queue
    #[serde(default)]
    pub queue: QueueConfig,

    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl DashboardConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> RuntimeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn from_file(path: &Path) -> RuntimeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// File (or defaults), then environment overrides, then validation
    pub fn load(path: Option<&Path>) -> RuntimeResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> RuntimeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_CHAIN_INTERVAL_MS) {
            self.schedule.chain_interval_ms = parse_override(ENV_CHAIN_INTERVAL_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_ALERT_INTERVAL_MS) {
            self.schedule.alert_interval_ms = parse_override(ENV_ALERT_INTERVAL_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_QUEUE_CAPACITY) {
            self.queue.capacity = parse_override(ENV_QUEUE_CAPACITY, &value)?;
        }
        Ok(())
    }

    /// Reject values the runtime cannot run with
    pub fn validate(&self) -> RuntimeResult<()> {
        let intervals = [
            ("schedule.alert_interval_ms", self.schedule.alert_interval_ms),
            ("schedule.traffic_interval_ms", self.schedule.traffic_interval_ms),
            ("schedule.chain_interval_ms", self.schedule.chain_interval_ms),
            ("schedule.clock_interval_ms", self.schedule.clock_interval_ms),
        ];
        for (name, value) in intervals {
            check_range(name, value, MAX_INTERVAL_MS)?;
        }

        check_range("queue.capacity", self.queue.capacity, MAX_QUEUE_CAPACITY)?;
        check_range("display.feed_capacity", self.display.feed_capacity, MAX_FEED_CAPACITY)?;
        check_range("display.traffic_window", self.display.traffic_window, MAX_TRAFFIC_WINDOW)?;
        Ok(())
    }
}

fn check_range<T>(name: &str, value: T, max: T) -> RuntimeResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value == T::default() {
        return Err(RuntimeError::Config(format!("{} must be greater than 0", name)));
    }
    if value > max {
        return Err(RuntimeError::Config(format!(
            "{} must be at most {}, got {}",
            name, max, value
        )));
    }
    Ok(())
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> RuntimeResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RuntimeError::Config(format!("{} has invalid value '{}'", key, value)))
}

/// Ticker periods, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Live alert feed
    #[serde(default = "default_alert_interval")]
    pub alert_interval_ms: u64,

    /// Traffic-rate window
    #[serde(default = "default_traffic_interval")]
    pub traffic_interval_ms: u64,

    /// Hash-chained log append
    #[serde(default = "default_chain_interval")]
    pub chain_interval_ms: u64,

    /// Sync clock
    #[serde(default = "default_clock_interval")]
    pub clock_interval_ms: u64,
}

fn default_alert_interval() -> u64 { 4000 }
fn default_traffic_interval() -> u64 { 2000 }
fn default_chain_interval() -> u64 { 7000 }
fn default_clock_interval() -> u64 { 1000 }

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            alert_interval_ms: 4000,
            traffic_interval_ms: 2000,
            chain_interval_ms: 7000,
            clock_interval_ms: 1000,
        }
    }
}

impl ScheduleConfig {
    pub fn alert_interval(&self) -> Duration {
        Duration::from_millis(self.alert_interval_ms)
    }

    pub fn traffic_interval(&self) -> Duration {
        Duration::from_millis(self.traffic_interval_ms)
    }

    pub fn chain_interval(&self) -> Duration {
        Duration::from_millis(self.chain_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}

/// Log writer queue configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Pending append requests before senders wait
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

fn default_queue_capacity() -> usize { 64 }

impl Default for QueueConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Digest characters shown before `...`
    #[serde(default = "default_preview_len")]
    pub digest_preview_len: usize,

    /// Alerts kept in the live feed
    #[serde(default = "default_feed_capacity")]
    pub feed_capacity: usize,

    /// Samples in the traffic window
    #[serde(default = "default_traffic_window")]
    pub traffic_window: usize,
}

fn default_preview_len() -> usize { 20 }
fn default_feed_capacity() -> usize { 50 }
fn default_traffic_window() -> usize { 10 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            digest_preview_len: 20,
            feed_capacity: 50,
            traffic_window: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.schedule.alert_interval(), Duration::from_secs(4));
        assert_eq!(config.schedule.traffic_interval(), Duration::from_secs(2));
        assert_eq!(config.schedule.chain_interval(), Duration::from_secs(7));
        assert_eq!(config.schedule.clock_interval(), Duration::from_secs(1));
        assert_eq!(config.queue.capacity, 64);
        assert_eq!(config.display.digest_preview_len, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            DashboardConfig::from_json_str(r#"{"schedule": {"chain_interval_ms": 500}}"#).unwrap();

        assert_eq!(config.schedule.chain_interval_ms, 500);
        assert_eq!(config.schedule.alert_interval_ms, 4000);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CHAIN_INTERVAL_MS, "1500"),
            (ENV_QUEUE_CAPACITY, " 8 "),
        ]
        .into_iter()
        .collect();

        let mut config = DashboardConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.schedule.chain_interval_ms, 1500);
        assert_eq!(config.schedule.alert_interval_ms, 4000);
        assert_eq!(config.queue.capacity, 8);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = DashboardConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_ALERT_INTERVAL_MS).then(|| "soon".to_string()))
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Config(msg) if msg.contains(ENV_ALERT_INTERVAL_MS)));
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let mut config = DashboardConfig::default();
        config.schedule.clock_interval_ms = 0;
        assert!(matches!(config.validate(), Err(RuntimeError::Config(_))));

        let mut config = DashboardConfig::default();
        config.queue.capacity = 0;
        assert!(matches!(config.validate(), Err(RuntimeError::Config(_))));

        let mut config = DashboardConfig::default();
        config.display.traffic_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_values() {
        let mut config = DashboardConfig::default();
        config
            .apply_overrides(|key| (key == ENV_QUEUE_CAPACITY).then(|| usize::MAX.to_string()))
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(RuntimeError::Config(msg)) if msg.contains("queue.capacity")
        ));

        let config = DashboardConfig::from_json_str(
            r#"{"display": {"feed_capacity": 18446744073709551615}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(RuntimeError::Config(msg)) if msg.contains("display.feed_capacity")
        ));

        let mut config = DashboardConfig::default();
        config.display.traffic_window = MAX_TRAFFIC_WINDOW + 1;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.schedule.chain_interval_ms = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_limits() {
        let mut config = DashboardConfig::default();
        config.schedule.chain_interval_ms = MAX_INTERVAL_MS;
        config.queue.capacity = MAX_QUEUE_CAPACITY;
        config.display.feed_capacity = MAX_FEED_CAPACITY;
        config.display.traffic_window = MAX_TRAFFIC_WINDOW;

        assert!(config.validate().is_ok());
    }

    fn temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "alertchain-config-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_reads_file() {
        let path = temp_config(
            "load",
            r#"{"schedule": {"traffic_interval_ms": 250}, "display": {"feed_capacity": 5}}"#,
        );

        let from_file = DashboardConfig::from_file(&path).unwrap();
        let loaded = DashboardConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert_eq!(from_file.schedule.traffic_interval_ms, 250);
        assert_eq!(from_file.display.feed_capacity, 5);
        assert_eq!(from_file.queue, QueueConfig::default());

        // Env overrides may apply on top; the file-only fields are untouched.
        let loaded = loaded.unwrap();
        assert_eq!(loaded.schedule.traffic_interval_ms, 250);
        assert_eq!(loaded.display.feed_capacity, 5);
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let path = temp_config("invalid", r#"{"display": {"traffic_window": 0}}"#);

        let result = DashboardConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(RuntimeError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!(
            "alertchain-config-{}-missing.json",
            std::process::id()
        ));

        assert!(matches!(
            DashboardConfig::load(Some(&path)),
            Err(RuntimeError::Io(_))
        ));
    }

    #[test]
    fn test_from_file_malformed_is_serialization_error() {
        let path = temp_config("malformed", "{schedule");

        let result = DashboardConfig::from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(RuntimeError::Serialization(_))));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = DashboardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(DashboardConfig::from_json_str(&json).unwrap(), config);
    }
}
