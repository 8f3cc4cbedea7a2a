/*!
 * Striped Counter Properties
 */

use proptest::prelude::*;
use std::thread;
use striped_metrics::core::sync::StripedCounter;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn concurrent_sum_is_workers_times_iterations(workers in 1usize..8, iterations in 1i64..2_000) {
        let counter = StripedCounter::new();

        thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| {
                    for _ in 0..iterations {
                        counter.add(1);
                    }
                });
            }
        });

        prop_assert_eq!(counter.sum(), workers as i64 * iterations);
    }

    #[test]
    fn sequential_adds_match_plain_sum(deltas in proptest::collection::vec(-1_000i64..1_000, 0..200)) {
        let counter = StripedCounter::new();
        for delta in &deltas {
            counter.add(*delta);
        }
        prop_assert_eq!(counter.sum(), deltas.iter().sum::<i64>());
    }

    #[test]
    fn add_zero_is_identity(start in -1_000_000i64..1_000_000) {
        let counter = StripedCounter::new();
        counter.add(start);
        counter.add(0);
        prop_assert_eq!(counter.sum(), start);
    }

    #[test]
    fn decrement_undoes_increment(start in -1_000_000i64..1_000_000, cells in 1usize..64) {
        let counter = StripedCounter::with_cells(cells);
        counter.add(start);
        counter.add(1);
        counter.add(-1);
        prop_assert_eq!(counter.sum(), start);
    }
}
