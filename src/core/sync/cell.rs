/*!
 * Padded Counter Cell
 *
 * A single 64-bit accumulator that owns a full cache-line pair, so that
 * neighbouring cells in a striped table never share a line.
 */

use std::sync::atomic::{AtomicI64, Ordering};

/// Alignment of one cell
///
/// Adjacent-line prefetchers on x86-64 pull lines in pairs, so cells are
/// spaced 128 bytes apart rather than 64.
pub const CELL_ALIGN: usize = 128;

#[repr(C, align(128))]
#[derive(Debug, Default)]
pub(crate) struct PaddedCell {
    value: AtomicI64,
}

impl PaddedCell {
    #[inline]
    pub(crate) const fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }

    #[inline(always)]
    pub(crate) fn load(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub(crate) fn store(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn swap(&self, value: i64) -> i64 {
        self.value.swap(value, Ordering::Relaxed)
    }

    /// Unconditional add, used when there is nothing to stripe across
    #[inline(always)]
    pub(crate) fn fetch_add(&self, delta: i64) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Single CAS attempt
    ///
    /// Returns `false` when another writer changed the cell between the load
    /// and the exchange. Callers treat that as a contention signal.
    #[inline(always)]
    pub(crate) fn try_add(&self, delta: i64) -> bool {
        let current = self.value.load(Ordering::Relaxed);
        self.value
            .compare_exchange(
                current,
                current.wrapping_add(delta),
                Ordering::Relaxed,
                Ordering::Relaxed,
            )
            .is_ok()
    }
}
