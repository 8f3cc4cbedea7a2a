/*!
 * Meter Metric
 * Event throughput with mean and 1/5/15-minute moving rates
 */

use super::clock::{default_clock, Clock};
use super::ewma::{Ewma, TICK_INTERVAL};
use crate::core::sync::StripedCounter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

const TICK_INTERVAL_NANOS: u64 = TICK_INTERVAL.as_nanos() as u64;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const ONE_SECOND: Duration = Duration::from_secs(1);

/// Measures the rate at which events occur
///
/// Moving averages are ticked lazily: every mark or rate read first catches
/// up on any whole tick intervals that elapsed since the last tick.
pub struct Meter {
    clock: Arc<dyn Clock>,
    count: StripedCounter,
    start_time: u64,
    last_tick: AtomicU64,
    m1: Ewma,
    m5: Ewma,
    m15: Ewma,
}

impl Meter {
    pub fn new() -> Self {
        Self::with_clock(default_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let start_time = clock.tick();
        Self {
            clock,
            count: StripedCounter::new(),
            start_time,
            last_tick: AtomicU64::new(start_time),
            m1: Ewma::one_minute(),
            m5: Ewma::five_minutes(),
            m15: Ewma::fifteen_minutes(),
        }
    }

    /// Record `n` events
    pub fn mark(&self, n: i64) {
        self.tick_if_necessary();
        self.count.add(n);
        self.m1.update(n);
        self.m5.update(n);
        self.m15.update(n);
    }

    pub fn count(&self) -> i64 {
        self.count.sum()
    }

    /// Events per second since the meter was created
    pub fn mean_rate(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            return 0.0;
        }

        let elapsed = self.clock.tick().saturating_sub(self.start_time);
        if elapsed == 0 {
            return 0.0;
        }
        count as f64 / elapsed as f64 * NANOS_PER_SECOND
    }

    pub fn m1_rate(&self) -> f64 {
        self.tick_if_necessary();
        self.m1.rate(ONE_SECOND)
    }

    pub fn m5_rate(&self) -> f64 {
        self.tick_if_necessary();
        self.m5.rate(ONE_SECOND)
    }

    pub fn m15_rate(&self) -> f64 {
        self.tick_if_necessary();
        self.m15.rate(ONE_SECOND)
    }

    /// Only the thread that wins the CAS on `last_tick` performs the ticks
    fn tick_if_necessary(&self) {
        let old_tick = self.last_tick.load(Ordering::Acquire);
        let new_tick = self.clock.tick();
        let age = new_tick.saturating_sub(old_tick);
        if age <= TICK_INTERVAL_NANOS {
            return;
        }

        let new_interval_start = new_tick - age % TICK_INTERVAL_NANOS;
        if self
            .last_tick
            .compare_exchange(
                old_tick,
                new_interval_start,
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .is_ok()
        {
            let required_ticks = age / TICK_INTERVAL_NANOS;
            trace!(ticks = required_ticks, "Advancing meter");
            for _ in 0..required_ticks {
                self.m1.tick();
                self.m5.tick();
                self.m15.tick();
            }
        }
    }
}

impl Default for Meter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Meter")
            .field("count", &self.count())
            .field("start_time", &self.start_time)
            .finish()
    }
}
