//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alertchain")]
#[command(about = "Simulated security-operations dashboard with a hash-chained alert log")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output (debug-level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the live dashboard until Ctrl-C (or --duration-secs)
    Run {
        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible alerts and traffic
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many seconds
        #[arg(long)]
        duration_secs: Option<u64>,

        /// Write the final chain as JSON to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print a line on every clock tick
        #[arg(long)]
        show_clock: bool,

        /// Continue appending to a previously exported chain
        #[arg(long)]
        resume: Option<PathBuf>,
    },

    /// Print the SHA-256 digest of some text
    Hash {
        /// Text to hash
        text: String,
    },

    /// Verify an exported chain (JSON array of entries)
    Verify {
        /// Exported chain file
        file: PathBuf,

        /// Output the verification result as JSON
        #[arg(long)]
        json: bool,
    },
}
