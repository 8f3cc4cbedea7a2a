/*!
 * Gauge Metric
 */

use std::sync::atomic::{AtomicI64, Ordering};

/// Instantaneous value set by the application
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicI64,
}

impl Gauge {
    pub const fn new() -> Self {
        Self {
            value: AtomicI64::new(0),
        }
    }

    #[inline]
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}
