//! alertchain terminal dashboard
//!
//! The `alertchain` binary: CLI parsing, logging setup, and a terminal
//! [`DashboardSink`](alertchain_runtime::DashboardSink) that renders alerts,
//! the traffic sparkline and the hash-chained log.

pub mod cli;
pub mod commands;
pub mod render;
pub mod terminal;

pub use cli::{Cli, Command};
pub use terminal::TerminalSink;
