//! Single-consumer log writer
//!
//! One task owns the [`HashChainedLog`]. Everyone else talks to it through
//! a [`LogHandle`], whose requests are queued on a bounded channel and
//! served strictly in arrival order. The "read last digest, compute, push"
//! sequence therefore only ever runs inside the writer task, one request at
//! a time.

use alertchain_core::{ChainError, ChainVerification, HashChainedLog, LogEntry};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::{RuntimeError, RuntimeResult};

/// Request served by the writer task
enum WriterCommand {
    Append {
        text: String,
        reply: oneshot::Sender<Result<LogEntry, ChainError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<LogEntry>>,
    },
    Verify {
        reply: oneshot::Sender<Result<ChainVerification, ChainError>>,
    },
    Shutdown,
}

/// Cloneable handle for submitting requests to the writer task
#[derive(Debug, Clone)]
pub struct LogHandle {
    tx: mpsc::Sender<WriterCommand>,
}

impl LogHandle {
    /// Append `text` and wait until the entry is committed
    ///
    /// Requests queue behind any earlier ones, so entries land in
    /// submission order.
    pub async fn append(&self, text: impl Into<String>) -> RuntimeResult<LogEntry> {
        let (reply, rx) = oneshot::channel();
        self.send(WriterCommand::Append {
            text: text.into(),
            reply,
        })
        .await?;
        let entry = rx.await.map_err(|_| RuntimeError::WriterClosed)??;
        Ok(entry)
    }

    /// Snapshot of all committed entries
    pub async fn entries(&self) -> RuntimeResult<Vec<LogEntry>> {
        let (reply, rx) = oneshot::channel();
        self.send(WriterCommand::Snapshot { reply }).await?;
        rx.await.map_err(|_| RuntimeError::WriterClosed)
    }

    /// Verify the chain as it stands after all earlier requests
    pub async fn verify(&self) -> RuntimeResult<ChainVerification> {
        let (reply, rx) = oneshot::channel();
        self.send(WriterCommand::Verify { reply }).await?;
        let verification = rx.await.map_err(|_| RuntimeError::WriterClosed)??;
        Ok(verification)
    }

    /// Whether the writer task has stopped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn send(&self, command: WriterCommand) -> RuntimeResult<()> {
        self.tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::WriterClosed)
    }
}

/// The writer task plus a handle to it
pub struct LogWriter {
    handle: LogHandle,
    task: JoinHandle<HashChainedLog>,
}

impl LogWriter {
    /// Move `log` into a new writer task with a queue of `capacity` requests
    pub fn spawn(log: HashChainedLog, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        tracing::info!(
            capacity = capacity.max(1),
            entries = log.len(),
            algorithm = log.algorithm(),
            "Starting log writer"
        );
        let task = tokio::spawn(run_writer(log, rx));

        Self {
            handle: LogHandle { tx },
            task,
        }
    }

    /// A new handle to this writer
    pub fn handle(&self) -> LogHandle {
        self.handle.clone()
    }

    /// Stop the writer and take back the log
    ///
    /// Requests queued before this call are served first. Requests sent
    /// afterwards fail with [`RuntimeError::WriterClosed`].
    pub async fn shutdown(self) -> RuntimeResult<HashChainedLog> {
        // The task may already be gone; joining below reports that.
        let _ = self.handle.send(WriterCommand::Shutdown).await;
        self.task
            .await
            .map_err(|e| RuntimeError::Internal(format!("log writer task failed: {}", e)))
    }
}

async fn run_writer(
    mut log: HashChainedLog,
    mut rx: mpsc::Receiver<WriterCommand>,
) -> HashChainedLog {
    while let Some(command) = rx.recv().await {
        match command {
            WriterCommand::Append { text, reply } => {
                let result = log.append(text).cloned();
                match &result {
                    Ok(entry) => tracing::debug!(
                        index = log.len() - 1,
                        digest = %entry.digest_preview(16),
                        "Appended log entry"
                    ),
                    Err(e) => tracing::warn!(error = %e, code = e.error_code(), "Append failed"),
                }
                // Caller may have given up waiting; the entry is committed regardless.
                let _ = reply.send(result);
            }
            WriterCommand::Snapshot { reply } => {
                let _ = reply.send(log.snapshot());
            }
            WriterCommand::Verify { reply } => {
                let _ = reply.send(log.verify());
            }
            WriterCommand::Shutdown => break,
        }
    }

    tracing::info!(entries = log.len(), "Log writer stopped");
    log
}
