//! Terminal sink

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use alertchain_runtime::{DashboardEvent, DashboardSink, RuntimeError, RuntimeResult};

use crate::render;

/// Writes rendered dashboard events to a terminal (or any writer)
pub struct TerminalSink<W: Write + Send> {
    out: Mutex<W>,
    preview_len: usize,
    show_clock: bool,
}

impl TerminalSink<std::io::Stdout> {
    /// Sink writing to stdout
    pub fn stdout(preview_len: usize) -> Self {
        Self::new(std::io::stdout(), preview_len)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, preview_len: usize) -> Self {
        Self {
            out: Mutex::new(out),
            preview_len,
            show_clock: false,
        }
    }

    /// Also print a line on every clock tick
    pub fn with_clock(mut self, show_clock: bool) -> Self {
        self.show_clock = show_clock;
        self
    }

    /// Take back the writer
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn render(&self, event: &DashboardEvent) -> Option<String> {
        match event {
            DashboardEvent::AlertRaised { alert } => Some(render::render_alert(alert)),
            DashboardEvent::TrafficUpdated { labels, samples } => {
                Some(render::render_traffic(labels, samples))
            }
            DashboardEvent::BlockAppended { chain, .. } => {
                Some(render::render_chain(chain, self.preview_len))
            }
            DashboardEvent::ClockSynced { at } => {
                self.show_clock.then(|| render::render_clock(at))
            }
        }
    }
}

#[async_trait]
impl<W: Write + Send> DashboardSink for TerminalSink<W> {
    fn name(&self) -> &str {
        "terminal"
    }

    async fn publish(&self, event: DashboardEvent) -> RuntimeResult<()> {
        let Some(text) = self.render(&event) else {
            return Ok(());
        };

        let mut out = self
            .out
            .lock()
            .map_err(|_| RuntimeError::Sink("terminal writer poisoned".to_string()))?;
        writeln!(out, "{}", text.trim_end())?;
        out.flush()?;
        Ok(())
    }
}
