//! Command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use alertchain_core::{
    sha256_hex, ChainVerification, ChainVerifier, HashChainedLog, LogEntry, Sha256Digest,
};
use alertchain_runtime::{Dashboard, DashboardConfig, RunReport};

use crate::render;
use crate::terminal::TerminalSink;

pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Options for `alertchain run`
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub duration: Option<Duration>,
    pub show_clock: bool,
    /// Exported chain to continue appending to
    pub resume: Option<PathBuf>,
}

/// Run the dashboard on stdout until Ctrl-C or the duration elapses
pub async fn run(config: DashboardConfig, options: RunOptions) -> CommandResult<RunReport> {
    let sink = TerminalSink::stdout(config.display.digest_preview_len).with_clock(options.show_clock);

    let mut dashboard = Dashboard::new(config).with_sink(Arc::new(sink));
    if let Some(path) = &options.resume {
        dashboard = dashboard.with_log(load_chain(path)?);
    }
    if let Some(seed) = options.seed {
        dashboard = dashboard.with_seed(seed);
    }

    let duration = options.duration;
    let shutdown = async move {
        match duration {
            Some(duration) => {
                tokio::select! {
                    _ = tokio::time::sleep(duration) => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            None => {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "Cannot listen for Ctrl-C, stopping");
                }
            }
        }
        tracing::info!("Shutdown requested");
    };

    let report = dashboard.run_until(shutdown).await?;
    Ok(report)
}

/// Write the chain as pretty JSON
pub fn export_chain(entries: &[LogEntry], path: &Path) -> CommandResult<()> {
    let json = serde_json::to_string_pretty(entries)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Chain exported");
    Ok(())
}

fn read_entries(path: &Path) -> CommandResult<Vec<LogEntry>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load an exported chain as a log to keep appending to
///
/// Fails with a chain integrity error if the file was edited.
pub fn load_chain(path: &Path) -> CommandResult<HashChainedLog> {
    let entries = read_entries(path)?;
    let log = HashChainedLog::from_entries(entries, Arc::new(Sha256Digest))?;
    tracing::info!(path = %path.display(), entries = log.len(), "Resuming exported chain");
    Ok(log)
}

/// SHA-256 of `text`, lowercase hex
pub fn hash(text: &str) -> String {
    sha256_hex(text)
}

/// Load an exported chain and verify it
pub fn verify_file(path: &Path) -> CommandResult<ChainVerification> {
    let entries = read_entries(path)?;
    let verification = ChainVerifier::verify(&entries, &Sha256Digest)?;
    Ok(verification)
}

/// Closing summary printed after `run`
pub fn render_summary(report: &RunReport) -> String {
    format!(
        "{} alerts, {} traffic ticks, {} blocks ({} skipped)\n{}",
        report.stats.alerts_raised,
        report.stats.traffic_ticks,
        report.stats.blocks_appended,
        report.stats.appends_skipped,
        render::render_verification(&report.verification),
    )
}
