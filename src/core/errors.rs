/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

/// Result alias for metric and reporter operations
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Result alias for benchmark runs
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Metric kinds tracked by the registry, used in name-conflict diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricKind {
    Counter,
    Gauge,
    Meter,
    Histogram,
    Timer,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Meter => "meter",
            MetricKind::Histogram => "histogram",
            MetricKind::Timer => "timer",
        };
        f.write_str(name)
    }
}

/// Metric-related errors
#[derive(Error, Debug, Diagnostic)]
pub enum MetricsError {
    #[error("Quantile must be between 0.0 and 1.0, got {0}")]
    #[diagnostic(
        code(metrics::invalid_quantile),
        help("Pass a quantile in the closed range [0.0, 1.0].")
    )]
    InvalidQuantile(f64),

    #[error("Metric '{name}' is already registered as a {existing}, cannot register it as a {requested}")]
    #[diagnostic(
        code(metrics::name_conflict),
        help("Metric names are unique across kinds. Pick a different name or remove the existing metric.")
    )]
    NameConflict {
        name: String,
        existing: MetricKind,
        requested: MetricKind,
    },

    #[error("Report failed: {0}")]
    #[diagnostic(
        code(metrics::report_failed),
        help("The reporter could not write its output. Check the destination writer.")
    )]
    Report(String),
}

impl From<std::io::Error> for MetricsError {
    fn from(err: std::io::Error) -> Self {
        MetricsError::Report(err.to_string())
    }
}

impl From<serde_json::Error> for MetricsError {
    fn from(err: serde_json::Error) -> Self {
        MetricsError::Report(err.to_string())
    }
}

/// Benchmark driver errors
#[derive(Error, Debug, Diagnostic)]
pub enum BenchError {
    #[error("Invalid benchmark configuration: {0}")]
    #[diagnostic(
        code(bench::invalid_config),
        help("Use at least one worker and keep workers * iterations within i64 range.")
    )]
    InvalidConfig(String),

    #[error("Failed to spawn worker {worker}")]
    #[diagnostic(
        code(bench::spawn_failed),
        help("The system may be out of threads or memory. Lower the worker count.")
    )]
    Spawn {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker {0} panicked")]
    #[diagnostic(code(bench::worker_panicked))]
    WorkerPanicked(usize),
}
