/*!
 * Histogram Metric
 * Distribution of values, sampled through a reservoir
 */

use super::reservoir::{ExponentiallyDecayingReservoir, Reservoir};
use super::snapshot::WeightedSnapshot;
use crate::core::sync::StripedCounter;

pub struct Histogram {
    count: StripedCounter,
    reservoir: Box<dyn Reservoir>,
}

impl Histogram {
    /// Histogram over the default exponentially decaying reservoir
    pub fn new() -> Self {
        Self::with_reservoir(Box::new(ExponentiallyDecayingReservoir::new()))
    }

    pub fn with_reservoir(reservoir: Box<dyn Reservoir>) -> Self {
        Self {
            count: StripedCounter::new(),
            reservoir,
        }
    }

    pub fn update(&self, value: i64) {
        self.count.increment();
        self.reservoir.update(value);
    }

    /// Number of values recorded, including those no longer sampled
    pub fn count(&self) -> i64 {
        self.count.sum()
    }

    pub fn snapshot(&self) -> WeightedSnapshot {
        self.reservoir.snapshot()
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Histogram")
            .field("count", &self.count())
            .field("sampled", &self.reservoir.len())
            .finish()
    }
}
