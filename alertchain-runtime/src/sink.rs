//! Dashboard sinks
//!
//! The scheduler produces [`DashboardEvent`]s; a sink decides how to show
//! them (terminal, logs, a test recorder).

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;

use alertchain_core::{Alert, LogEntry};

use crate::error::RuntimeResult;

/// Something the dashboard wants displayed
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// A new alert was pushed onto the live feed
    AlertRaised { alert: Alert },

    /// The traffic window shifted by one sample
    TrafficUpdated {
        labels: Vec<String>,
        samples: Vec<u32>,
    },

    /// An entry was committed to the hash-chained log
    BlockAppended {
        entry: LogEntry,
        /// Full chain after the append, oldest first
        chain: Vec<LogEntry>,
    },

    /// Clock tick
    ClockSynced { at: DateTime<Local> },
}

impl DashboardEvent {
    /// Short name for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::AlertRaised { .. } => "alert_raised",
            DashboardEvent::TrafficUpdated { .. } => "traffic_updated",
            DashboardEvent::BlockAppended { .. } => "block_appended",
            DashboardEvent::ClockSynced { .. } => "clock_synced",
        }
    }
}

/// Display side of the dashboard
#[async_trait]
pub trait DashboardSink: Send + Sync {
    /// Sink name
    fn name(&self) -> &str;

    /// Show one event
    async fn publish(&self, event: DashboardEvent) -> RuntimeResult<()>;
}

/// Sink that only writes `tracing` records
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl DashboardSink for TracingSink {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn publish(&self, event: DashboardEvent) -> RuntimeResult<()> {
        match &event {
            DashboardEvent::AlertRaised { alert } => tracing::info!(
                kind = %alert.kind,
                src = %alert.src_ip,
                dst = %alert.dst_ip,
                severity = alert.severity.as_str(),
                "Alert raised"
            ),
            DashboardEvent::TrafficUpdated { samples, .. } => tracing::debug!(
                latest = samples.last().copied().unwrap_or_default(),
                "Traffic updated"
            ),
            DashboardEvent::BlockAppended { entry, chain } => tracing::info!(
                height = chain.len(),
                text = %entry.text,
                digest = %entry.digest,
                "Block appended"
            ),
            DashboardEvent::ClockSynced { at } => {
                tracing::trace!(at = %at.format("%H:%M:%S"), "Clock synced")
            }
        }
        Ok(())
    }
}

/// Sink that keeps every event, for tests and replays
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RwLock<Vec<DashboardEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in publish order
    pub async fn events(&self) -> Vec<DashboardEvent> {
        self.events.read().await.clone()
    }

    /// Number of recorded events of `kind`
    pub async fn count(&self, kind: &str) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }

    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl DashboardSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn publish(&self, event: DashboardEvent) -> RuntimeResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
