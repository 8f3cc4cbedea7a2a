/*!
 * Striped Counter Benchmark
 *
 * Runs the default workload against a striped counter and prints the
 * elapsed time and final count to stdout.
 */

use striped_metrics::{init_tracing, run, BenchmarkConfig};
use tracing::warn;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = BenchmarkConfig::default();
    let report = run(&config)?;

    if !report.is_consistent() {
        warn!(
            observed = report.observed,
            expected = report.expected,
            "Final count does not match expected total"
        );
    }

    println!("{report}");
    Ok(())
}
