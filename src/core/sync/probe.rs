/*!
 * Thread Probe
 *
 * Per-thread hash used to pick a cell in a striped table. Each thread gets a
 * well-mixed non-zero seed on first use; on contention the probe is advanced
 * with xorshift64 so the thread migrates to a different cell.
 */

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Golden-ratio increment, spreads consecutive seeds across the 64-bit space
const SEED_INCREMENT: u64 = 0x9E37_79B9_7F4A_7C15;

static PROBE_SEEDER: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PROBE: Cell<u64> = const { Cell::new(0) };
}

/// Current probe for the calling thread (never zero)
#[inline]
pub(crate) fn current() -> u64 {
    PROBE
        .try_with(|probe| {
            let value = probe.get();
            if value != 0 {
                return value;
            }
            let seeded = seed();
            probe.set(seeded);
            seeded
        })
        // Thread-local storage already torn down (called from a TLS destructor)
        .unwrap_or(SEED_INCREMENT)
}

/// Rehash the probe after a collision and store it for the calling thread
#[inline]
pub(crate) fn advance(probe: u64) -> u64 {
    let next = xorshift(probe);
    let _ = PROBE.try_with(|slot| slot.set(next));
    next
}

#[inline(always)]
fn xorshift(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}

/// SplitMix64 finalizer over a global sequence
fn seed() -> u64 {
    let mut x = PROBE_SEEDER
        .fetch_add(SEED_INCREMENT, Ordering::Relaxed)
        .wrapping_add(SEED_INCREMENT);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    if x == 0 {
        SEED_INCREMENT
    } else {
        x
    }
}
