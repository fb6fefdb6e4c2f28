//! Plain-text rendering of dashboard state

use chrono::{DateTime, Local};

use alertchain_core::traffic::MAX_RATE;
use alertchain_core::{Alert, ChainVerification, LogEntry, Severity};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One feed line, tagged with the severity
pub fn render_alert(alert: &Alert) -> String {
    let tag = match alert.severity {
        Severity::Warning => "WARN",
        Severity::Critical => "CRIT",
    };
    format!("[{}] {}", tag, alert.banner())
}

/// Sparkline of the traffic window plus the latest value
pub fn render_traffic(labels: &[String], samples: &[u32]) -> String {
    let spark: String = samples.iter().map(|&s| spark_char(s)).collect();
    let span = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => format!("{}..{}", first, last),
        _ => "-".to_string(),
    };
    let latest = samples.last().copied().unwrap_or_default();
    format!("Packets/sec {} {} latest {}", span, spark, latest)
}

fn spark_char(sample: u32) -> char {
    let level = (sample as usize * SPARK_LEVELS.len()) / MAX_RATE as usize;
    SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
}

/// Every block in order, with shortened digests
pub fn render_chain(chain: &[LogEntry], preview_len: usize) -> String {
    let mut out = format!("Blockchain alert log ({} blocks)\n", chain.len());
    for (i, entry) in chain.iter().enumerate() {
        out.push_str(&format!("  #{:<3} {}\n", i, entry.text));
        out.push_str(&format!("       Hash: {}\n", entry.digest_preview(preview_len)));
    }
    out
}

pub fn render_clock(at: &DateTime<Local>) -> String {
    format!("Last sync: {}", at.format("%H:%M:%S"))
}

/// Human summary of a verification result
pub fn render_verification(verification: &ChainVerification) -> String {
    if verification.is_valid {
        return format!("Chain OK: {} entries verified", verification.entry_count);
    }

    format!(
        "Chain INVALID at entry {}: {} ({})",
        verification
            .first_invalid_index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "?".to_string()),
        verification
            .error_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        verification.error_message.as_deref().unwrap_or(""),
    )
}
