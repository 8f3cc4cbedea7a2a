/*!
 * Stripe Width Selection
 *
 * CPU-topology-aware cell counts for striped counters. Widths are powers of
 * two so a probe maps to a cell with a mask instead of a modulo.
 */

use tracing::warn;

/// Upper bound on cells per counter (32 KiB of padded cells)
pub const MAX_CELLS: usize = 256;

/// Parallelism assumed when the platform cannot report it
pub const FALLBACK_PARALLELISM: usize = 8;

/// Stripe width calculation (pure functions)
pub struct CellSizing;

impl CellSizing {
    /// Hardware threads available to this process
    #[inline]
    pub fn parallelism() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|err| {
                warn!(
                    error = %err,
                    fallback = FALLBACK_PARALLELISM,
                    "Failed to detect available parallelism"
                );
                FALLBACK_PARALLELISM
            })
    }

    /// Default width: one cell per hardware thread, rounded up
    #[inline]
    pub fn default_cells() -> usize {
        Self::normalize(Self::parallelism())
    }

    /// Round a requested width up to a power of two within `[1, MAX_CELLS]`
    #[inline]
    pub fn normalize(requested: usize) -> usize {
        requested.clamp(1, MAX_CELLS).next_power_of_two()
    }
}
