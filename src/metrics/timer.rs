/*!
 * Timer Metric
 * Duration histogram combined with a throughput meter
 */

use super::clock::{default_clock, Clock};
use super::histogram::Histogram;
use super::meter::Meter;
use super::reservoir::{ExponentiallyDecayingReservoir, Reservoir};
use super::snapshot::WeightedSnapshot;
use std::sync::Arc;
use std::time::Duration;

/// Records durations in nanoseconds and the rate at which they occur
pub struct Timer {
    clock: Arc<dyn Clock>,
    histogram: Histogram,
    meter: Meter,
}

impl Timer {
    pub fn new() -> Self {
        Self::with_reservoir(Box::new(ExponentiallyDecayingReservoir::new()))
    }

    pub fn with_reservoir(reservoir: Box<dyn Reservoir>) -> Self {
        Self::with_clock(reservoir, default_clock())
    }

    pub fn with_clock(reservoir: Box<dyn Reservoir>, clock: Arc<dyn Clock>) -> Self {
        Self {
            histogram: Histogram::with_reservoir(reservoir),
            meter: Meter::with_clock(clock.clone()),
            clock,
        }
    }

    pub fn update(&self, duration: Duration) {
        self.meter.mark(1);
        self.histogram
            .update(i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX));
    }

    /// Time a closure and return its result
    pub fn time<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _context = self.start();
        f()
    }

    /// Start timing; the elapsed time is recorded when the context drops
    pub fn start(&self) -> TimerContext<'_> {
        TimerContext {
            timer: self,
            start: self.clock.tick(),
            recorded: false,
        }
    }

    pub fn count(&self) -> i64 {
        self.meter.count()
    }

    pub fn mean_rate(&self) -> f64 {
        self.meter.mean_rate()
    }

    pub fn m1_rate(&self) -> f64 {
        self.meter.m1_rate()
    }

    pub fn m5_rate(&self) -> f64 {
        self.meter.m5_rate()
    }

    pub fn m15_rate(&self) -> f64 {
        self.meter.m15_rate()
    }

    pub fn snapshot(&self) -> WeightedSnapshot {
        self.histogram.snapshot()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("count", &self.count())
            .finish()
    }
}

/// Scope guard for one timing
pub struct TimerContext<'a> {
    timer: &'a Timer,
    start: u64,
    recorded: bool,
}

impl TimerContext<'_> {
    /// Record now and return the elapsed time
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let elapsed = Duration::from_nanos(self.timer.clock.tick().saturating_sub(self.start));
        if !self.recorded {
            self.recorded = true;
            self.timer.update(elapsed);
        }
        elapsed
    }
}

impl Drop for TimerContext<'_> {
    fn drop(&mut self) {
        if !self.recorded {
            self.record();
        }
    }
}
