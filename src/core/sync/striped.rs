/*!
 * Striped Counter
 *
 * Low-contention 64-bit accumulator for write-heavy, read-rare workloads.
 *
 * ## Problem
 *
 * A single `AtomicI64` shared by many writers serializes every increment on
 * one cache line:
 * ```text
 * Core 1: fetch_add(1)  -> line moves to Core 1
 * Core 2: fetch_add(1)  -> line moves to Core 2
 * Core 3: fetch_add(1)  -> line moves to Core 3
 * ```
 *
 * ## Solution
 *
 * Split the value across padded cells and let each thread hash to its own:
 * ```text
 * Core 1: cells[probe1 & mask] += 1
 * Core 2: cells[probe2 & mask] += 1   (different line, no transfer)
 * sum() = base + cells[0] + ... + cells[n-1]
 * ```
 *
 * Writers start on a single `base` cell. The first failed CAS on `base`
 * materializes the cell table; from then on a collision on a cell rehashes
 * the thread's probe so it moves elsewhere. While the table is being built
 * by another thread, writers keep retrying `base` instead of blocking.
 *
 * ## Reads
 *
 * `sum()` walks the cells without locking. It is exact once writers have
 * quiesced (e.g. after joining them) but is not a linearizable snapshot while
 * writers are active.
 */

use super::cell::PaddedCell;
use super::probe;
use super::sizing::CellSizing;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Striped concurrent counter
///
/// # Performance
///
/// - **Uncontended**: one CAS on `base`, same cost as an atomic
/// - **Contended**: writers settle on distinct cells, ~N-way less line traffic
/// - **Memory**: 128 bytes per cell, allocated only after first contention
pub struct StripedCounter {
    base: PaddedCell,
    cells: OnceLock<Box<[PaddedCell]>>,
    /// Spinlock guarding table materialization
    busy: AtomicBool,
    width: usize,
}

impl StripedCounter {
    /// Counter striped across one cell per available hardware thread
    pub fn new() -> Self {
        Self::with_cells(CellSizing::default_cells())
    }

    /// Counter with an explicit stripe width
    ///
    /// The width is rounded up to a power of two. A width of 1 disables
    /// striping entirely and every update goes to a single atomic.
    pub fn with_cells(cells: usize) -> Self {
        Self {
            base: PaddedCell::new(0),
            cells: OnceLock::new(),
            busy: AtomicBool::new(false),
            width: CellSizing::normalize(cells),
        }
    }

    /// Add `delta` to the counter (primary hot path)
    #[inline]
    pub fn add(&self, delta: i64) {
        if self.width == 1 {
            self.base.fetch_add(delta);
            return;
        }

        match self.cells.get() {
            Some(cells) => self.add_striped(cells, delta),
            None => {
                if !self.base.try_add(delta) {
                    self.add_contended(delta);
                }
            }
        }
    }

    #[inline]
    pub fn increment(&self) {
        self.add(1);
    }

    #[inline]
    pub fn decrement(&self) {
        self.add(-1);
    }

    /// Sum of all cells at the time of traversal
    ///
    /// Updates racing with the traversal may or may not be included.
    pub fn sum(&self) -> i64 {
        let mut total = self.base.load();
        if let Some(cells) = self.cells.get() {
            for cell in cells.iter() {
                total = total.wrapping_add(cell.load());
            }
        }
        total
    }

    /// Zero every cell
    ///
    /// Only meaningful without concurrent writers; racing updates may survive.
    pub fn reset(&self) {
        self.base.store(0);
        if let Some(cells) = self.cells.get() {
            for cell in cells.iter() {
                cell.store(0);
            }
        }
    }

    /// Sum and zero in one pass
    ///
    /// Every update lands either in the returned value or in the counter's
    /// next sum, never in neither.
    pub fn sum_then_reset(&self) -> i64 {
        let mut total = self.base.swap(0);
        if let Some(cells) = self.cells.get() {
            for cell in cells.iter() {
                total = total.wrapping_add(cell.swap(0));
            }
        }
        total
    }

    /// Configured stripe width
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width
    }

    /// Whether the cell table has been allocated
    #[inline]
    pub fn is_striped(&self) -> bool {
        self.cells.get().is_some()
    }

    /// Slow path: `base` CAS failed before the table existed
    #[cold]
    fn add_contended(&self, delta: i64) {
        loop {
            if let Some(cells) = self.cells.get() {
                return self.add_striped(cells, delta);
            }
            if self.try_materialize() {
                continue;
            }
            // Another thread is building the table
            if self.base.try_add(delta) {
                return;
            }
            std::hint::spin_loop();
        }
    }

    fn add_striped(&self, cells: &[PaddedCell], delta: i64) {
        let mask = cells.len() - 1;
        let mut probe = probe::current();
        let mut collided = false;

        loop {
            if cells[(probe as usize) & mask].try_add(delta) {
                return;
            }
            if collided && self.base.try_add(delta) {
                return;
            }
            collided = true;
            probe = probe::advance(probe);
        }
    }

    /// Returns `false` if another thread holds the materialization lock
    fn try_materialize(&self) -> bool {
        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }

        self.cells.get_or_init(|| {
            (0..self.width)
                .map(|_| PaddedCell::new(0))
                .collect::<Vec<_>>()
                .into_boxed_slice()
        });

        self.busy.store(false, Ordering::Release);
        true
    }
}

impl Default for StripedCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StripedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripedCounter")
            .field("sum", &self.sum())
            .field("cells", &self.width)
            .field("striped", &self.is_striped())
            .finish()
    }
}
