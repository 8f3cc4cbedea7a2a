/*!
 * Benchmark Driver
 * Fixed pool of scoped workers hammering one shared accumulator
 */

use super::config::BenchmarkConfig;
use super::report::BenchmarkReport;
use crate::core::errors::{BenchError, BenchResult};
use crate::core::sync::{Accumulator, StripedCounter};
use std::io;
use std::thread::{self, ScopedJoinHandle};
use std::time::Instant;
use tracing::{debug, info};

/// Run the benchmark against a fresh [`StripedCounter`]
pub fn run(config: &BenchmarkConfig) -> BenchResult<BenchmarkReport> {
    let counter = StripedCounter::new();
    run_with(config, &counter)
}

/// Run the benchmark against any accumulator
///
/// Each worker calls `add(1)` exactly `iterations` times. Elapsed time covers
/// launch through join; the sum is read once afterwards.
pub fn run_with<A>(config: &BenchmarkConfig, accumulator: &A) -> BenchResult<BenchmarkReport>
where
    A: Accumulator + ?Sized,
{
    config.validate()?;
    let expected = config
        .expected_total()
        .ok_or_else(|| BenchError::InvalidConfig("total overflows i64".to_string()))?;
    let iterations = config.iterations;

    info!(
        workers = config.workers,
        iterations,
        accumulator = accumulator.label(),
        "Starting benchmark"
    );

    let start = Instant::now();
    thread::scope(|scope| {
        launch_and_join(config.workers, |worker| {
            thread::Builder::new()
                .name(format!("bench-worker-{worker}"))
                .spawn_scoped(scope, move || {
                    for _ in 0..iterations {
                        accumulator.add(1);
                    }
                    debug!(worker, "Worker finished");
                })
        })
    })?;
    let elapsed = start.elapsed();

    let report = BenchmarkReport {
        elapsed,
        observed: accumulator.sum(),
        expected,
    };

    info!(
        elapsed_ms = report.elapsed_millis() as u64,
        observed = report.observed,
        expected = report.expected,
        "Benchmark finished"
    );

    Ok(report)
}

/// Spawn workers until one fails, then join every worker that started
///
/// A spawn failure takes precedence over a worker panic. Every started worker
/// is joined either way, so the enclosing scope never sees an unjoined panic.
fn launch_and_join<'scope, F>(workers: usize, mut spawn: F) -> BenchResult<()>
where
    F: FnMut(usize) -> io::Result<ScopedJoinHandle<'scope, ()>>,
{
    let mut handles = Vec::with_capacity(workers);
    let mut spawn_failure = None;
    for worker in 0..workers {
        match spawn(worker) {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                spawn_failure = Some(BenchError::Spawn { worker, source });
                break;
            }
        }
    }

    let mut panic_failure = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() && panic_failure.is_none() {
            panic_failure = Some(BenchError::WorkerPanicked(worker));
        }
    }

    match spawn_failure.or(panic_failure) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
