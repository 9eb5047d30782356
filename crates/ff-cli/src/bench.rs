use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::Instant;

use ff_core::{FilterEngine, Settings};

use crate::entries::{load_entries, read_patterns, RecordedEntry};

pub struct BenchOptions {
    pub patterns: PathBuf,
    pub entries: PathBuf,
    pub iterations: usize,
}

struct BenchResult {
    decisions: usize,
    total_ms: f64,
    avg_us: f64,
    p50_us: f64,
    p95_us: f64,
    p99_us: f64,
    ops_per_sec: u64,
}

pub fn run_bench(opts: BenchOptions) -> Result<(), String> {
    let patterns = read_patterns(&opts.patterns)?;
    let entries = load_entries(&opts.entries)?;
    if entries.is_empty() {
        return Err(format!("No entries in {}", opts.entries.display()));
    }

    println!("FeedFilter Benchmark");
    println!("==================================================");

    let compile_start = Instant::now();
    let engine = FilterEngine::new(Settings {
        filter_patterns: patterns,
        ..Settings::default()
    });
    let compile_ms = compile_start.elapsed().as_secs_f64() * 1000.0;

    println!(
        "Compiled {} directive(s) in {:.2}ms",
        engine.pattern().directive_count(),
        compile_ms
    );
    println!("Entries: {}, iterations: {}", entries.len(), opts.iterations);

    warmup(&engine, &entries);
    let result = run_decisions(&engine, &entries, opts.iterations);
    println!("{}", format_result(&result));

    Ok(())
}

fn warmup(engine: &FilterEngine, entries: &[RecordedEntry]) {
    for _ in 0..10 {
        for entry in entries {
            let _ = engine.decide(entry);
        }
    }
}

fn run_decisions(engine: &FilterEngine, entries: &[RecordedEntry], iterations: usize) -> BenchResult {
    let mut latencies = Vec::with_capacity(entries.len() * iterations);

    for _ in 0..iterations {
        for entry in entries {
            let start = Instant::now();
            let _ = engine.decide(entry);
            latencies.push(start.elapsed().as_secs_f64() * 1_000_000.0);
        }
    }

    latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let total_us = latencies.iter().sum::<f64>();
    let total_ms = total_us / 1000.0;
    let avg_us = if latencies.is_empty() { 0.0 } else { total_us / latencies.len() as f64 };

    BenchResult {
        decisions: latencies.len(),
        total_ms,
        avg_us,
        p50_us: percentile(&latencies, 0.50),
        p95_us: percentile(&latencies, 0.95),
        p99_us: percentile(&latencies, 0.99),
        ops_per_sec: if total_ms > 0.0 { (latencies.len() as f64 / (total_ms / 1000.0)) as u64 } else { 0 },
    }
}

fn format_result(result: &BenchResult) -> String {
    format!(
        "decide:\n  Decisions:   {}\n  Total time:  {:.2}ms\n  Avg latency: {:.2}μs\n  P50 latency: {:.2}μs\n  P95 latency: {:.2}μs\n  P99 latency: {:.2}μs\n  Throughput:  {} ops/sec",
        result.decisions,
        result.total_ms,
        result.avg_us,
        result.p50_us,
        result.p95_us,
        result.p99_us,
        result.ops_per_sec,
    )
}

fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let idx = ((values.len() as f64) * p).ceil() as usize;
    let idx = idx.saturating_sub(1).min(values.len() - 1);
    values[idx]
}
