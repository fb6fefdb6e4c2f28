//! Synthetic intrusion alerts
//!
//! There is no detection here: alerts come from a small fixed catalog and an
//! [`AlertSource`] decides which one fires next.

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    /// Lowercase name, suitable for style classes and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// A synthetic intrusion alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Attack kind, e.g. "Port Scan"
    pub kind: String,
    pub src_ip: IpAddr,
    pub dst_ip: IpAddr,
    pub severity: Severity,
}

impl Alert {
    pub fn new(kind: impl Into<String>, src_ip: IpAddr, dst_ip: IpAddr, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            src_ip,
            dst_ip,
            severity,
        }
    }

    /// Text recorded in the hash-chained log
    pub fn log_text(&self) -> String {
        format!("Alert: {} from {}", self.kind, self.src_ip)
    }

    /// One-line banner for the live alert feed
    pub fn banner(&self) -> String {
        format!(
            "🚨 {} from {} to {} - Level: {}",
            self.kind, self.src_ip, self.dst_ip, self.severity
        )
    }
}

/// The three canned alerts the dashboard cycles through
pub fn default_catalog() -> Vec<Alert> {
    vec![
        Alert::new(
            "Port Scan",
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 5)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 4)),
            Severity::Warning,
        ),
        Alert::new(
            "DDoS",
            IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            Severity::Critical,
        ),
        Alert::new(
            "Brute Force",
            IpAddr::V4(Ipv4Addr::new(172, 16, 0, 3)),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 8)),
            Severity::Critical,
        ),
    ]
}

/// Anything that can produce the next alert
pub trait AlertSource: Send {
    /// Next alert, or `None` if the source has nothing to offer
    fn next_alert(&mut self) -> Option<Alert>;
}

/// Picks uniformly at random from a catalog
#[derive(Debug)]
pub struct RandomAlertSource<R = StdRng> {
    catalog: Vec<Alert>,
    rng: R,
}

impl<R: Rng + Send> RandomAlertSource<R> {
    pub fn new(catalog: Vec<Alert>, rng: R) -> Self {
        Self { catalog, rng }
    }
}

impl RandomAlertSource<StdRng> {
    /// Default catalog, OS-seeded
    pub fn from_entropy() -> Self {
        Self::new(default_catalog(), StdRng::from_entropy())
    }

    /// Default catalog, reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(default_catalog(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> AlertSource for RandomAlertSource<R> {
    fn next_alert(&mut self) -> Option<Alert> {
        self.catalog.choose(&mut self.rng).cloned()
    }
}

/// Walks a catalog in order, wrapping around
#[derive(Debug, Clone)]
pub struct CyclingAlertSource {
    catalog: Vec<Alert>,
    next: usize,
}

impl CyclingAlertSource {
    pub fn new(catalog: Vec<Alert>) -> Self {
        Self { catalog, next: 0 }
    }
}

impl Default for CyclingAlertSource {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl AlertSource for CyclingAlertSource {
    fn next_alert(&mut self) -> Option<Alert> {
        if self.catalog.is_empty() {
            return None;
        }
        let alert = self.catalog[self.next % self.catalog.len()].clone();
        self.next = (self.next + 1) % self.catalog.len();
        Some(alert)
    }
}

/// Newest-first list of raised alerts, bounded
#[derive(Debug, Clone)]
pub struct AlertFeed {
    alerts: VecDeque<Alert>,
    capacity: usize,
}

impl AlertFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Put `alert` at the top; the oldest alert falls off when full
    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    /// Alerts, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_text_format() {
        let catalog = default_catalog();
        assert_eq!(catalog[0].log_text(), "Alert: Port Scan from 192.168.1.5");
        assert_eq!(catalog[1].log_text(), "Alert: DDoS from 203.0.113.7");
        assert_eq!(catalog[2].log_text(), "Alert: Brute Force from 172.16.0.3");
    }

    #[test]
    fn test_banner_format() {
        let alert = &default_catalog()[1];
        assert_eq!(
            alert.banner(),
            "🚨 DDoS from 203.0.113.7 to 10.0.0.1 - Level: Critical"
        );
        assert_eq!(alert.severity.as_str(), "critical");
    }

    #[test]
    fn test_random_source_stays_in_catalog() {
        let catalog = default_catalog();
        let mut source = RandomAlertSource::seeded(7);

        for _ in 0..50 {
            let alert = source.next_alert().unwrap();
            assert!(catalog.contains(&alert));
        }
    }

    #[test]
    fn test_random_source_is_reproducible() {
        let mut a = RandomAlertSource::seeded(42);
        let mut b = RandomAlertSource::seeded(42);

        for _ in 0..20 {
            assert_eq!(a.next_alert(), b.next_alert());
        }
    }

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let mut random = RandomAlertSource::new(Vec::new(), StdRng::seed_from_u64(1));
        let mut cycling = CyclingAlertSource::new(Vec::new());

        assert!(random.next_alert().is_none());
        assert!(cycling.next_alert().is_none());
    }

    #[test]
    fn test_cycling_source_wraps() {
        let mut source = CyclingAlertSource::default();
        let kinds: Vec<String> = (0..4).map(|_| source.next_alert().unwrap().kind).collect();

        assert_eq!(kinds, vec!["Port Scan", "DDoS", "Brute Force", "Port Scan"]);
    }

    #[test]
    fn test_feed_is_newest_first_and_bounded() {
        let mut feed = AlertFeed::new(2);
        let mut source = CyclingAlertSource::default();

        for _ in 0..3 {
            feed.push(source.next_alert().unwrap());
        }

        let kinds: Vec<&str> = feed.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Brute Force", "DDoS"]);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.latest().map(|a| a.kind.as_str()), Some("Brute Force"));
    }

    #[test]
    fn test_alert_serializes_ips_as_strings() {
        let json = serde_json::to_value(&default_catalog()[0]).unwrap();
        assert_eq!(json["src_ip"], "192.168.1.5");
        assert_eq!(json["severity"], "warning");
    }
}
