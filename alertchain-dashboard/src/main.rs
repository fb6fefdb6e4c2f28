//! alertchain binary
//!
//! ## Usage
//!
//! ```bash
//! # Live dashboard, Ctrl-C to stop
//! alertchain run
//!
//! # Reproducible 30 second run, chain exported afterwards
//! alertchain run --seed 7 --duration-secs 30 --export chain.json
//!
//! # Faster chain ticks via the environment
//! ALERTCHAIN_CHAIN_INTERVAL_MS=1000 alertchain run
//!
//! # Keep appending to an exported chain
//! alertchain run --resume chain.json --export chain.json
//!
//! # Hash some text / check an exported chain
//! alertchain hash "hello world"
//! alertchain verify chain.json
//! ```

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alertchain_dashboard::commands::{self, RunOptions};
use alertchain_dashboard::{render, Cli, Command};
use alertchain_runtime::DashboardConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "alertchain=debug,alertchain_dashboard=debug,alertchain_runtime=debug"
    } else {
        "alertchain=info,alertchain_dashboard=info,alertchain_runtime=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Run {
            config,
            seed,
            duration_secs,
            export,
            show_clock,
            resume,
        } => {
            let config = DashboardConfig::load(config.as_deref())?;
            tracing::info!("Starting alertchain v{}", env!("CARGO_PKG_VERSION"));

            let options = RunOptions {
                seed,
                duration: duration_secs.map(Duration::from_secs),
                show_clock,
                resume,
            };
            let report = commands::run(config, options).await?;

            if let Some(path) = export {
                commands::export_chain(&report.entries, &path)?;
            }
            println!("{}", commands::render_summary(&report));

            if !report.verification.is_valid {
                std::process::exit(1);
            }
        }
        Command::Hash { text } => {
            println!("{}", commands::hash(&text));
        }
        Command::Verify { file, json } => {
            let verification = commands::verify_file(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verification)?);
            } else {
                println!("{}", render::render_verification(&verification));
            }

            if !verification.is_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
