/*!
 * Metrics Module
 * Counters, gauges, meters, histograms and timers built on striped accumulation
 */

pub mod clock;
pub mod counter;
pub mod ewma;
pub mod gauge;
pub mod histogram;
pub mod meter;
pub mod registry;
pub mod reservoir;
pub mod snapshot;
pub mod timer;

pub use clock::{default_clock, Clock, ManualClock, SystemClock};
pub use counter::Counter;
pub use ewma::{Ewma, TICK_INTERVAL};
pub use gauge::Gauge;
pub use histogram::Histogram;
pub use meter::Meter;
pub use registry::{HistogramStats, MeterStats, MetricsRegistry, RegistrySnapshot, TimerStats};
pub use reservoir::{ExponentiallyDecayingReservoir, Reservoir};
pub use snapshot::{SnapshotSummary, WeightedSample, WeightedSnapshot};
pub use timer::{Timer, TimerContext};
