/*!
 * Synchronization Primitives
 *
 * Contention-aware counting primitives:
 * - Striped counter (LongAdder-style cell table with per-thread probes)
 * - Single-atomic and mutex baselines behind a common `Accumulator` trait
 * - CPU-topology-aware stripe width selection
 *
 * # Performance
 *
 * - Cache-line-pair aligned cells to prevent false sharing
 * - Lock-free hot path; the only lock is a try-lock taken once to build the
 *   cell table, and losers fall back to the base cell instead of waiting
 */

mod accumulator;
mod cell;
mod probe;
mod sizing;
mod striped;

pub use accumulator::{Accumulator, AtomicAccumulator, LockedAccumulator};
pub use cell::CELL_ALIGN;
pub use sizing::{CellSizing, FALLBACK_PARALLELISM, MAX_CELLS};
pub use striped::StripedCounter;
