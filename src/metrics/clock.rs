/*!
 * Clocks
 * Time sources for rate and decay calculations
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Source of time for metrics
///
/// `tick` and `time` must come from the same underlying source so that
/// meters (nanosecond ticks) and reservoirs (second resolution) agree.
pub trait Clock: Send + Sync {
    /// Nanoseconds since an arbitrary fixed origin
    fn tick(&self) -> u64;

    /// Whole seconds since the same origin
    fn time(&self) -> u64 {
        self.tick() / NANOS_PER_SECOND
    }
}

/// Wall clock measured from the UNIX epoch
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn tick(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }
}

/// Shared process-wide system clock
pub fn default_clock() -> Arc<dyn Clock> {
    static CLOCK: OnceLock<Arc<dyn Clock>> = OnceLock::new();
    CLOCK.get_or_init(|| Arc::new(SystemClock)).clone()
}

/// Manually advanced clock for deterministic tests
///
/// Safe to share: the test thread advances it while metrics read it.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(start.as_nanos() as u64),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn add_nanos(&self, nanos: u64) {
        self.advance(Duration::from_nanos(nanos));
    }

    pub fn add_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    pub fn add_seconds(&self, seconds: u64) {
        self.advance(Duration::from_secs(seconds));
    }

    pub fn add_minutes(&self, minutes: u64) {
        self.advance(Duration::from_secs(minutes * 60));
    }

    pub fn add_hours(&self, hours: u64) {
        self.advance(Duration::from_secs(hours * 3600));
    }
}

impl Clock for ManualClock {
    fn tick(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}
