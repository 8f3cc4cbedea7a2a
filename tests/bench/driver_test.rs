/*!
 * Driver Scenarios
 */

use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::atomic::{AtomicI64, Ordering};
use striped_metrics::bench::{run, run_with, BenchmarkConfig};
use striped_metrics::core::sync::{Accumulator, LockedAccumulator};
use striped_metrics::BenchError;

/// Fails on the first add from any worker
struct Exploding;

impl Accumulator for Exploding {
    fn add(&self, _delta: i64) {
        panic!("boom");
    }

    fn sum(&self) -> i64 {
        0
    }

    fn label(&self) -> &'static str {
        "exploding"
    }
}

/// Records adds and panics in exactly one worker thread
struct PanicsInWorkerZero {
    total: AtomicI64,
}

impl Accumulator for PanicsInWorkerZero {
    fn add(&self, delta: i64) {
        if std::thread::current().name() == Some("bench-worker-0") {
            panic!("worker zero fails");
        }
        self.total.fetch_add(delta, Ordering::Relaxed);
    }

    fn sum(&self) -> i64 {
        self.total.load(Ordering::Relaxed)
    }

    fn label(&self) -> &'static str {
        "panics-in-worker-zero"
    }
}

#[test]
#[serial]
fn test_default_workload_is_exact() {
    let report = run(&BenchmarkConfig::default()).unwrap();

    assert_eq!(report.expected, 24_000_000);
    assert_eq!(report.observed, report.expected);

    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Finished in "));
    assert!(lines[0].ends_with(" millis"));
    assert_eq!(lines[1], "Final count: 24000000, expected 24000000");
}

#[test]
fn test_single_worker_zero_iterations() {
    let report = run(&BenchmarkConfig::new(1, 0)).unwrap();
    assert_eq!(report.expected, 0);
    assert_eq!(report.observed, 0);
    assert!(report.is_consistent());
}

#[test]
fn test_single_worker_is_sequential_sum() {
    let report = run(&BenchmarkConfig::sequential(12_345)).unwrap();
    assert_eq!(report.observed, 12_345);
}

#[test]
fn test_elapsed_line_is_an_integer() {
    let report = run(&BenchmarkConfig::new(2, 100)).unwrap();
    let text = report.to_string();
    let first = text.lines().next().unwrap();
    let millis = first
        .strip_prefix("Finished in ")
        .and_then(|rest| rest.strip_suffix(" millis"))
        .unwrap();
    assert!(millis.parse::<u128>().is_ok());
}

#[test]
fn test_zero_workers_is_invalid() {
    let err = run(&BenchmarkConfig::new(0, 1_000)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfig(_)));
}

#[test]
fn test_overflowing_total_is_invalid() {
    let err = run(&BenchmarkConfig::new(2, u64::MAX)).unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfig(_)));
}

#[test]
fn test_worker_panic_is_reported() {
    let err = run_with(&BenchmarkConfig::new(3, 10), &Exploding).unwrap_err();
    assert!(matches!(err, BenchError::WorkerPanicked(0)));
}

#[test]
fn test_other_workers_finish_when_one_panics() {
    let accumulator = PanicsInWorkerZero {
        total: AtomicI64::new(0),
    };
    let err = run_with(&BenchmarkConfig::new(4, 100), &accumulator).unwrap_err();

    assert!(matches!(err, BenchError::WorkerPanicked(0)));
    assert_eq!(accumulator.sum(), 300);
}

#[test]
fn test_locked_baseline() {
    let locked = LockedAccumulator::new();
    let report = run_with(&BenchmarkConfig::new(4, 2_500), &locked).unwrap();
    assert_eq!(report.observed, 10_000);
}
