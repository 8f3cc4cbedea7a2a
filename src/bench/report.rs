/*!
 * Benchmark Report
 */

use std::fmt;
use std::time::Duration;

/// Outcome of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkReport {
    /// Wall-clock time from the first launch to the last join
    pub elapsed: Duration,
    /// Counter sum read once after all workers joined
    pub observed: i64,
    /// `workers * iterations`
    pub expected: i64,
}

impl BenchmarkReport {
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn is_consistent(&self) -> bool {
        self.observed == self.expected
    }
}

/// The two report lines, without a trailing newline
impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finished in {} millis", self.elapsed_millis())?;
        write!(
            f,
            "Final count: {}, expected {}",
            self.observed, self.expected
        )
    }
}
