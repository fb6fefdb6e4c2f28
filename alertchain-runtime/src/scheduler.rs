//! Dashboard scheduler
//!
//! Four independent tickers multiplexed in one task:
//!
//! ```text
//!  alert   ──▶ feed.push ─────────────────────────────▶ AlertRaised
//!  traffic ──▶ window.tick ───────────────────────────▶ TrafficUpdated
//!  chain   ──▶ LogHandle::append ──▶ (writer task) ───▶ BlockAppended
//!  clock   ───────────────────────────────────────────▶ ClockSynced
//! ```
//!
//! Each ticker fires one period after start, then every period.

use std::future::Future;
use std::sync::Arc;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use alertchain_core::{Alert, AlertFeed, AlertSource, TrafficWindow};

use crate::config::DashboardConfig;
use crate::error::RuntimeResult;
use crate::sink::{DashboardEvent, DashboardSink};
use crate::writer::LogHandle;

/// Counters for one scheduler run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub alerts_raised: u64,
    pub traffic_ticks: u64,
    pub blocks_appended: u64,
    /// Chain ticks whose append failed and was skipped
    pub appends_skipped: u64,
    pub clock_syncs: u64,
    /// Events a sink refused
    pub sink_errors: u64,
}

/// What the scheduler leaves behind when it stops
#[derive(Debug, Clone)]
pub struct SchedulerOutcome {
    pub stats: RunStats,
    /// Live feed at shutdown, newest first
    pub feed: Vec<Alert>,
    /// Traffic window at shutdown, oldest first
    pub traffic: Vec<u32>,
}

/// Drives the dashboard tickers
pub struct DashboardScheduler {
    config: DashboardConfig,
    feed_source: Box<dyn AlertSource>,
    chain_source: Box<dyn AlertSource>,
    feed: AlertFeed,
    traffic: TrafficWindow,
    rng: StdRng,
    log: LogHandle,
    sink: Arc<dyn DashboardSink>,
    stats: RunStats,
}

impl DashboardScheduler {
    /// Create a scheduler
    ///
    /// The feed and the chain draw from separate sources so that each
    /// ticker picks its own alert, independently of the other.
    pub fn new(
        config: DashboardConfig,
        feed_source: Box<dyn AlertSource>,
        chain_source: Box<dyn AlertSource>,
        log: LogHandle,
        sink: Arc<dyn DashboardSink>,
    ) -> Self {
        Self::with_rng(config, feed_source, chain_source, log, sink, StdRng::from_entropy())
    }

    /// Create a scheduler with a fixed RNG for the traffic window
    pub fn with_rng(
        config: DashboardConfig,
        feed_source: Box<dyn AlertSource>,
        chain_source: Box<dyn AlertSource>,
        log: LogHandle,
        sink: Arc<dyn DashboardSink>,
        mut rng: StdRng,
    ) -> Self {
        let feed = AlertFeed::new(config.display.feed_capacity);
        let traffic = TrafficWindow::random(config.display.traffic_window, &mut rng);

        Self {
            config,
            feed_source,
            chain_source,
            feed,
            traffic,
            rng,
            log,
            sink,
            stats: RunStats::default(),
        }
    }

    /// Current traffic window
    pub fn traffic(&self) -> &TrafficWindow {
        &self.traffic
    }

    /// Run until `shutdown` resolves
    ///
    /// Recoverable failures (a digest error on append, a sink refusing an
    /// event) are logged and skipped. A closed log writer ends the run with
    /// an error.
    pub async fn run<F>(mut self, shutdown: F) -> RuntimeResult<SchedulerOutcome>
    where
        F: Future<Output = ()>,
    {
        let schedule = self.config.schedule.clone();
        let mut alert_tick = ticker(schedule.alert_interval());
        let mut traffic_tick = ticker(schedule.traffic_interval());
        let mut chain_tick = ticker(schedule.chain_interval());
        let mut clock_tick = ticker(schedule.clock_interval());

        tracing::info!(
            alert_ms = schedule.alert_interval_ms,
            traffic_ms = schedule.traffic_interval_ms,
            chain_ms = schedule.chain_interval_ms,
            clock_ms = schedule.clock_interval_ms,
            sink = self.sink.name(),
            "Dashboard scheduler started"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,
                _ = chain_tick.tick() => self.on_chain_tick().await?,
                _ = alert_tick.tick() => self.on_alert_tick().await,
                _ = traffic_tick.tick() => self.on_traffic_tick().await,
                _ = clock_tick.tick() => self.on_clock_tick().await,
            }
        }

        tracing::info!(
            alerts = self.stats.alerts_raised,
            blocks = self.stats.blocks_appended,
            skipped = self.stats.appends_skipped,
            "Dashboard scheduler stopped"
        );

        Ok(SchedulerOutcome {
            stats: self.stats,
            feed: self.feed.iter().cloned().collect(),
            traffic: self.traffic.samples(),
        })
    }

    async fn on_alert_tick(&mut self) {
        let Some(alert) = self.feed_source.next_alert() else {
            tracing::debug!("Alert source empty, nothing raised");
            return;
        };
        self.feed.push(alert.clone());
        self.stats.alerts_raised += 1;
        self.publish(DashboardEvent::AlertRaised { alert }).await;
    }

    async fn on_traffic_tick(&mut self) {
        let sample = self.traffic.tick(&mut self.rng);
        self.stats.traffic_ticks += 1;
        tracing::debug!(sample, "Traffic tick");
        self.publish(DashboardEvent::TrafficUpdated {
            labels: self.traffic.labels(),
            samples: self.traffic.samples(),
        })
        .await;
    }

    async fn on_chain_tick(&mut self) -> RuntimeResult<()> {
        let Some(alert) = self.chain_source.next_alert() else {
            tracing::debug!("Alert source empty, no block appended");
            return Ok(());
        };

        let entry = match self.log.append(alert.log_text()).await {
            Ok(entry) => entry,
            Err(e) if e.is_skippable() => {
                self.stats.appends_skipped += 1;
                tracing::warn!(error = %e, "Skipping block for this tick");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let chain = self.log.entries().await?;

        self.stats.blocks_appended += 1;
        self.publish(DashboardEvent::BlockAppended { entry, chain }).await;
        Ok(())
    }

    async fn on_clock_tick(&mut self) {
        self.stats.clock_syncs += 1;
        self.publish(DashboardEvent::ClockSynced { at: Local::now() })
            .await;
    }

    async fn publish(&mut self, event: DashboardEvent) {
        let kind = event.kind();
        if let Err(e) = self.sink.publish(event).await {
            self.stats.sink_errors += 1;
            tracing::warn!(error = %e, kind, sink = self.sink.name(), "Sink rejected event");
        }
    }
}

fn ticker(period: std::time::Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

