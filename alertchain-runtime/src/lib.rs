//! alertchain runtime - timer-driven dashboard
//!
//! Drives the `alertchain-core` types from periodic tickers:
//! - Spawns a single log-writer task that owns the hash-chained log
//! - Runs alert, traffic, chain and clock tickers in one scheduler task
//! - Sends everything worth showing to a [`DashboardSink`]
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        DASHBOARD                           │
//! │                                                            │
//! │  ┌──────────────────────┐   append    ┌─────────────────┐  │
//! │  │  DashboardScheduler  │ ──(mpsc)──▶ │   LogWriter     │  │
//! │  │  alert/traffic/      │ ◀─(reply)── │ HashChainedLog  │  │
//! │  │  chain/clock ticks   │             └─────────────────┘  │
//! │  └──────────┬───────────┘                                  │
//! │             │ DashboardEvent                               │
//! │       ┌─────▼─────┐                                        │
//! │       │   Sink    │  terminal / tracing / recording        │
//! │       └───────────┘                                        │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use alertchain_runtime::{Dashboard, DashboardConfig};
//!
//! let report = Dashboard::new(DashboardConfig::default())
//!     .with_seed(7)
//!     .run_until(tokio::time::sleep(Duration::from_secs(30)))
//!     .await?;
//!
//! assert!(report.verification.is_valid);
//! ```

pub mod config;
pub mod error;
pub mod scheduler;
pub mod sink;
pub mod writer;

pub use config::{
    DashboardConfig, DisplayConfig, QueueConfig, ScheduleConfig, MAX_FEED_CAPACITY,
    MAX_INTERVAL_MS, MAX_QUEUE_CAPACITY, MAX_TRAFFIC_WINDOW,
};
pub use error::{RuntimeError, RuntimeResult};
pub use scheduler::{DashboardScheduler, RunStats, SchedulerOutcome};
pub use sink::{DashboardEvent, DashboardSink, RecordingSink, TracingSink};
pub use writer::{LogHandle, LogWriter};

use std::future::Future;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use alertchain_core::{
    Alert, AlertSource, ChainVerification, HashChainedLog, LogEntry, RandomAlertSource,
};

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stats: RunStats,
    /// Live feed at shutdown, newest first
    pub feed: Vec<Alert>,
    /// Traffic samples at shutdown, oldest first
    pub traffic: Vec<u32>,
    /// Final chain, oldest first
    pub entries: Vec<LogEntry>,
    pub verification: ChainVerification,
}

/// A configured dashboard, ready to run
pub struct Dashboard {
    config: DashboardConfig,
    log: HashChainedLog,
    sink: Arc<dyn DashboardSink>,
    seed: Option<u64>,
    sources: Option<(Box<dyn AlertSource>, Box<dyn AlertSource>)>,
}

impl Dashboard {
    /// Dashboard with an empty SHA-256 log, random alerts and a tracing sink
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            log: HashChainedLog::new(),
            sink: Arc::new(TracingSink),
            seed: None,
            sources: None,
        }
    }

    /// Send events to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn DashboardSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Make alert picks and traffic samples reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use explicit alert sources for the feed and the chain tickers
    pub fn with_sources(
        mut self,
        feed_source: Box<dyn AlertSource>,
        chain_source: Box<dyn AlertSource>,
    ) -> Self {
        self.sources = Some((feed_source, chain_source));
        self
    }

    /// Start from an existing log instead of an empty one
    pub fn with_log(mut self, log: HashChainedLog) -> Self {
        self.log = log;
        self
    }

    /// Run until `shutdown` resolves, then stop the writer and report
    pub async fn run_until<F>(self, shutdown: F) -> RuntimeResult<RunReport>
    where
        F: Future<Output = ()>,
    {
        self.config.validate()?;

        let (rng, default_sources) = match self.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                (
                    RandomAlertSource::seeded(seed.wrapping_add(1)),
                    RandomAlertSource::seeded(seed.wrapping_add(2)),
                ),
            ),
            None => (
                StdRng::from_entropy(),
                (RandomAlertSource::from_entropy(), RandomAlertSource::from_entropy()),
            ),
        };
        let (feed_source, chain_source) = self.sources.unwrap_or_else(|| {
            (
                Box::new(default_sources.0) as Box<dyn AlertSource>,
                Box::new(default_sources.1) as Box<dyn AlertSource>,
            )
        });

        let writer = LogWriter::spawn(self.log, self.config.queue.capacity);
        let scheduler = DashboardScheduler::with_rng(
            self.config,
            feed_source,
            chain_source,
            writer.handle(),
            self.sink,
            rng,
        );

        // Stop the writer even if the scheduler failed.
        let outcome = scheduler.run(shutdown).await;
        let stopped = writer.shutdown().await;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Err(stop_err) = &stopped {
                    tracing::warn!(error = %stop_err, "Log writer did not stop cleanly");
                }
                return Err(e);
            }
        };
        let log = stopped?;

        let verification = log.verify()?;
        if !verification.is_valid {
            tracing::error!(
                index = ?verification.first_invalid_index,
                error = ?verification.error_type,
                "Chain failed verification at shutdown"
            );
        }

        Ok(RunReport {
            stats: outcome.stats,
            feed: outcome.feed,
            traffic: outcome.traffic,
            entries: log.snapshot(),
            verification,
        })
    }
}
