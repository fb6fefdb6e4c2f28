//! LogWriter / LogHandle tests

use std::sync::Arc;

use alertchain_core::{
    sha256_hex, ChainError, DigestPrimitive, HashChainedLog, Result, Sha256Digest,
};
use alertchain_runtime::{LogWriter, RuntimeError};

/// SHA-256 that refuses inputs starting with a given prefix
struct RefusingDigest {
    prefix: &'static str,
}

impl DigestPrimitive for RefusingDigest {
    fn algorithm(&self) -> &'static str {
        "refusing-sha256"
    }

    fn digest_hex(&self, data: &[u8]) -> Result<String> {
        if data.starts_with(self.prefix.as_bytes()) {
            return Err(ChainError::digest_unavailable("refusing-sha256", "refused"));
        }
        Sha256Digest.digest_hex(data)
    }
}

#[tokio::test]
async fn test_joined_appends_commit_in_submission_order() {
    let writer = LogWriter::spawn(HashChainedLog::new(), 8);
    let handle = writer.handle();

    let (a, b, c) = tokio::join!(handle.append("a"), handle.append("b"), handle.append("c"));
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

    assert_eq!(a.previous_digest, "0");
    assert_eq!(b.previous_digest, a.digest);
    assert_eq!(c.previous_digest, b.digest);

    let texts: Vec<String> = handle
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);

    writer.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submitters_keep_chain_valid() {
    let writer = LogWriter::spawn(HashChainedLog::new(), 4);

    let mut tasks = Vec::new();
    for submitter in 0..8 {
        let handle = writer.handle();
        tasks.push(tokio::spawn(async move {
            for i in 0..25 {
                handle
                    .append(format!("submitter {} alert {}", submitter, i))
                    .await
                    .unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let log = writer.shutdown().await.unwrap();
    assert_eq!(log.len(), 200);
    assert!(log.verify().unwrap().is_valid);

    // Each submitter awaited its own appends, so its entries appear in order.
    for submitter in 0..8 {
        let prefix = format!("submitter {} alert ", submitter);
        let seen: Vec<u32> = log
            .iter()
            .filter_map(|e| e.text.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(seen, (0..25).collect::<Vec<u32>>());
    }
}

#[tokio::test]
async fn test_full_queue_makes_senders_wait_not_fail() {
    let writer = LogWriter::spawn(HashChainedLog::new(), 1);
    let handle = writer.handle();

    let appends: Vec<_> = (0..50)
        .map(|i| {
            let handle = handle.clone();
            tokio::spawn(async move { handle.append(format!("alert {}", i)).await })
        })
        .collect();
    for append in appends {
        append.await.unwrap().unwrap();
    }

    assert_eq!(handle.verify().await.unwrap().entry_count, 50);
    writer.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_digest_failure_is_reported_and_chain_continues() {
    let log = HashChainedLog::with_primitive(Arc::new(RefusingDigest { prefix: "bad" }));
    let writer = LogWriter::spawn(log, 4);
    let handle = writer.handle();

    let first = handle.append("good one").await.unwrap();
    let err = handle.append("bad one").await.unwrap_err();
    let second = handle.append("good two").await.unwrap();

    assert!(matches!(err, RuntimeError::Chain(ChainError::DigestUnavailable { .. })));
    assert!(err.is_skippable());
    assert_eq!(second.previous_digest, first.digest);
    assert_eq!(
        second.digest,
        sha256_hex(&format!("good two{}", first.digest))
    );

    let log = writer.shutdown().await.unwrap();
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn test_shutdown_serves_queued_requests_first() {
    let writer = LogWriter::spawn(HashChainedLog::new(), 16);
    let handle = writer.handle();

    // Both appends are queued before the shutdown request.
    let (x, y, log) = tokio::join!(handle.append("x"), handle.append("y"), writer.shutdown());

    let (x, y, log) = (x.unwrap(), y.unwrap(), log.unwrap());
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries(), &[x, y]);
    assert!(matches!(
        handle.entries().await,
        Err(RuntimeError::WriterClosed)
    ));
}

#[tokio::test]
async fn test_writer_continues_an_existing_log() {
    let mut log = HashChainedLog::new();
    log.append("before").unwrap();
    let tip = log.last_digest().to_string();

    let writer = LogWriter::spawn(log, 4);
    let entry = writer.handle().append("after").await.unwrap();

    assert_eq!(entry.previous_digest, tip);
    assert!(writer.handle().verify().await.unwrap().is_valid);
    writer.shutdown().await.unwrap();
}
