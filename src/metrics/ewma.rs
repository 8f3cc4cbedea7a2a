/*!
 * Exponentially Weighted Moving Average
 *
 * UNIX load-average style rate estimate. Events are accumulated between
 * ticks and folded into the rate once per tick interval:
 *
 * ```text
 * instant = events_since_last_tick / interval
 * rate    = rate + alpha * (instant - rate)
 * ```
 *
 * The caller (normally a `Meter`) is responsible for ticking every
 * `TICK_INTERVAL`.
 */

use crate::core::sync::StripedCounter;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Interval between ticks expected by the preset averages
pub const TICK_INTERVAL: Duration = Duration::from_secs(5);

const TICK_INTERVAL_SECS: f64 = 5.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Smoothing factor for an average over `minutes` ticked every 5 seconds
#[inline]
fn alpha_for(minutes: f64) -> f64 {
    1.0 - (-TICK_INTERVAL_SECS / SECONDS_PER_MINUTE / minutes).exp()
}

pub struct Ewma {
    uncounted: StripedCounter,
    /// Events per nanosecond, stored as `f64` bits
    rate: AtomicU64,
    initialized: AtomicBool,
    alpha: f64,
    interval: Duration,
}

impl Ewma {
    pub fn new(alpha: f64, interval: Duration) -> Self {
        Self {
            uncounted: StripedCounter::new(),
            rate: AtomicU64::new(0f64.to_bits()),
            initialized: AtomicBool::new(false),
            alpha,
            interval,
        }
    }

    pub fn one_minute() -> Self {
        Self::new(alpha_for(1.0), TICK_INTERVAL)
    }

    pub fn five_minutes() -> Self {
        Self::new(alpha_for(5.0), TICK_INTERVAL)
    }

    pub fn fifteen_minutes() -> Self {
        Self::new(alpha_for(15.0), TICK_INTERVAL)
    }

    /// Record `n` events since the last tick
    #[inline]
    pub fn update(&self, n: i64) {
        self.uncounted.add(n);
    }

    /// Fold accumulated events into the rate
    ///
    /// Updates may race with a tick, but ticks must not race each other: the
    /// rate is read, modified and stored non-atomically. `Meter` guarantees a
    /// single ticker through its CAS on `last_tick`.
    pub fn tick(&self) {
        let count = self.uncounted.sum_then_reset();
        let instant_rate = count as f64 / self.interval.as_nanos() as f64;

        if self.initialized.load(Ordering::Acquire) {
            let old_rate = f64::from_bits(self.rate.load(Ordering::Acquire));
            let new_rate = old_rate + self.alpha * (instant_rate - old_rate);
            self.rate.store(new_rate.to_bits(), Ordering::Release);
        } else {
            self.rate.store(instant_rate.to_bits(), Ordering::Release);
            self.initialized.store(true, Ordering::Release);
        }
    }

    /// Rate expressed in events per `period`
    pub fn rate(&self, period: Duration) -> f64 {
        f64::from_bits(self.rate.load(Ordering::Acquire)) * period.as_nanos() as f64
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tick_interval(&self) -> Duration {
        self.interval
    }
}

impl std::fmt::Debug for Ewma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ewma")
            .field("alpha", &self.alpha)
            .field("rate_per_sec", &self.rate(Duration::from_secs(1)))
            .finish()
    }
}
