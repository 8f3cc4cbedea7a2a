/*!
 * Striped Metrics Library
 * Contention-spreading counters, metric primitives built on them, and a
 * multi-threaded benchmark driver
 */

pub mod bench;
pub mod core;
pub mod metrics;
pub mod monitoring;
pub mod reporting;

// Re-exports
pub use bench::{run, run_with, BenchmarkConfig, BenchmarkReport};
pub use crate::core::errors::{BenchError, BenchResult, MetricKind, MetricsError, Result};
pub use crate::core::sync::{Accumulator, AtomicAccumulator, LockedAccumulator, StripedCounter};
pub use metrics::{
    Counter, ExponentiallyDecayingReservoir, Gauge, Histogram, Meter, MetricsRegistry, Reservoir,
    Timer, WeightedSnapshot,
};
pub use monitoring::init_tracing;
pub use reporting::{JsonReporter, Reporter, ScheduledReporter, StreamReporter, TracingReporter};
