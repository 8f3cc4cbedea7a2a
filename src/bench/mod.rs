/*!
 * Benchmark Module
 * Multi-threaded accumulation driver and its report
 */

pub mod config;
pub mod driver;
pub mod report;

pub use config::BenchmarkConfig;
pub use driver::{run, run_with};
pub use report::BenchmarkReport;
