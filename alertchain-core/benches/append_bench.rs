//! Benchmarks for the hash-chained log
//!
//! Append throughput and full-chain verification cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use alertchain_core::{AlertSource, CyclingAlertSource, HashChainedLog};

fn build_log(len: usize) -> HashChainedLog {
    let mut source = CyclingAlertSource::default();
    let mut log = HashChainedLog::new();
    for _ in 0..len {
        let text = source.next_alert().map(|a| a.log_text()).unwrap_or_default();
        log.append(text).unwrap();
    }
    log
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_single", |b| {
        let mut log = HashChainedLog::new();
        b.iter(|| {
            let entry = log.append(black_box("Alert: Port Scan from 192.168.1.5")).unwrap();
            black_box(entry.digest.len())
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_chain");

    for len in [10usize, 100, 1000] {
        let log = build_log(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &log, |b, log| {
            b.iter(|| black_box(log.verify().unwrap().is_valid))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_append, bench_verify);
criterion_main!(benches);
