/*!
 * Striped Counter Tests
 * Concurrent accumulation against the public counter API
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use striped_metrics::core::sync::{
    Accumulator, AtomicAccumulator, LockedAccumulator, StripedCounter,
};

#[test]
fn test_twenty_four_workers_one_million_each() {
    let counter = StripedCounter::new();

    thread::scope(|s| {
        for _ in 0..24 {
            s.spawn(|| {
                for _ in 0..1_000_000 {
                    counter.add(1);
                }
            });
        }
    });

    assert_eq!(counter.sum(), 24_000_000);
}

#[test]
fn test_shared_through_arc() {
    let counter = Arc::new(StripedCounter::with_cells(8));
    let mut handles = Vec::new();

    for _ in 0..8 {
        let counter = counter.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..50_000 {
                counter.increment();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.sum(), 400_000);
}

#[test]
fn test_mixed_increments_and_decrements_cancel() {
    let counter = StripedCounter::new();

    thread::scope(|s| {
        for worker in 0..8 {
            let counter = &counter;
            s.spawn(move || {
                for _ in 0..20_000 {
                    if worker % 2 == 0 {
                        counter.increment();
                    } else {
                        counter.decrement();
                    }
                }
            });
        }
    });

    assert_eq!(counter.sum(), 0);
}

#[test]
fn test_sum_is_stable_after_join() {
    let counter = StripedCounter::new();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10_000 {
                    counter.add(3);
                }
            });
        }
    });

    let first = counter.sum();
    assert_eq!(first, 120_000);
    assert_eq!(counter.sum(), first);
    assert_eq!(counter.sum(), first);
}

#[test]
fn test_all_accumulators_agree() {
    let striped = StripedCounter::new();
    let atomic = AtomicAccumulator::new();
    let locked = LockedAccumulator::new();
    let accumulators: [&dyn Accumulator; 3] = [&striped, &atomic, &locked];

    for accumulator in accumulators {
        thread::scope(|s| {
            for _ in 0..6 {
                s.spawn(|| {
                    for _ in 0..5_000 {
                        accumulator.add(1);
                    }
                });
            }
        });
        assert_eq!(accumulator.sum(), 30_000, "{}", accumulator.label());
    }
}
