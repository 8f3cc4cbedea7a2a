/*!
 * Benchmark Configuration
 */

use crate::core::errors::{BenchError, BenchResult};

/// Worker and iteration counts for one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Number of worker threads
    pub workers: usize,
    /// `add(1)` calls per worker
    pub iterations: u64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(24, 1_000_000)
    }
}

impl BenchmarkConfig {
    pub const fn new(workers: usize, iterations: u64) -> Self {
        Self {
            workers,
            iterations,
        }
    }

    /// Single worker, useful as a sequential baseline
    pub const fn sequential(iterations: u64) -> Self {
        Self::new(1, iterations)
    }

    /// `workers * iterations`, or `None` if it does not fit in an `i64`
    pub fn expected_total(&self) -> Option<i64> {
        let workers = i64::try_from(self.workers).ok()?;
        let iterations = i64::try_from(self.iterations).ok()?;
        workers.checked_mul(iterations)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.workers == 0 {
            return Err(BenchError::InvalidConfig(
                "at least one worker is required".to_string(),
            ));
        }
        if self.expected_total().is_none() {
            return Err(BenchError::InvalidConfig(format!(
                "{} workers * {} iterations overflows i64",
                self.workers, self.iterations
            )));
        }
        Ok(())
    }
}
