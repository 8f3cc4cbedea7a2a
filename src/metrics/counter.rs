/*!
 * Counter Metric
 * Monotonic-or-not event counter backed by a striped counter
 */

use crate::core::sync::StripedCounter;
use std::fmt;

/// Incrementing and decrementing counter
///
/// Updates go through a `StripedCounter`, so heavily shared counters do not
/// serialize their writers.
#[derive(Default)]
pub struct Counter {
    adder: StripedCounter,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn inc(&self, n: i64) {
        self.adder.add(n);
    }

    #[inline]
    pub fn dec(&self, n: i64) {
        self.adder.add(n.wrapping_neg());
    }

    pub fn count(&self) -> i64 {
        self.adder.sum()
    }
}

/// Cloning copies the current count into an independent counter
impl Clone for Counter {
    fn clone(&self) -> Self {
        let copy = Counter::new();
        copy.inc(self.count());
        copy
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter")
            .field("count", &self.count())
            .finish()
    }
}
