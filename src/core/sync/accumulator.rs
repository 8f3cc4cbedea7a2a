/*!
 * Accumulator Abstraction
 *
 * Common seam for anything that can absorb concurrent `add` calls and report
 * a total. The benchmark driver is generic over it so the striped counter can
 * be measured against simpler baselines.
 */

use super::StripedCounter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Concurrent additive accumulator
///
/// Implementations must be:
/// - **Thread-safe**: `add` may be called from any number of threads at once
/// - **Exact when quiescent**: `sum` is exact once all writers are joined
pub trait Accumulator: Send + Sync {
    fn add(&self, delta: i64);

    fn sum(&self) -> i64;

    /// Short label for reports and benchmark ids
    fn label(&self) -> &'static str;
}

impl Accumulator for StripedCounter {
    #[inline(always)]
    fn add(&self, delta: i64) {
        StripedCounter::add(self, delta);
    }

    fn sum(&self) -> i64 {
        StripedCounter::sum(self)
    }

    fn label(&self) -> &'static str {
        "striped"
    }
}

/// Single shared atomic, the baseline a striped counter is meant to beat
#[repr(C, align(128))]
#[derive(Debug, Default)]
pub struct AtomicAccumulator {
    value: AtomicI64,
}

impl AtomicAccumulator {
    pub const fn new() -> Self {
        Self {
            value: AtomicI64::new(0),
        }
    }
}

impl Accumulator for AtomicAccumulator {
    #[inline(always)]
    fn add(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    fn sum(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn label(&self) -> &'static str {
        "atomic"
    }
}

/// Mutex-protected scalar (worst case under contention)
#[derive(Debug, Default)]
pub struct LockedAccumulator {
    value: Mutex<i64>,
}

impl LockedAccumulator {
    pub const fn new() -> Self {
        Self {
            value: parking_lot::const_mutex(0),
        }
    }
}

impl Accumulator for LockedAccumulator {
    #[inline]
    fn add(&self, delta: i64) {
        let mut guard = self.value.lock();
        *guard = guard.wrapping_add(delta);
    }

    fn sum(&self) -> i64 {
        *self.value.lock()
    }

    fn label(&self) -> &'static str {
        "mutex"
    }
}
