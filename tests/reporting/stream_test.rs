/*!
 * Stream and JSON Reporter Tests
 */

use pretty_assertions::assert_eq;
use std::io::{self, Write};
use std::sync::Arc;
use striped_metrics::metrics::MetricsRegistry;
use striped_metrics::reporting::{JsonReporter, Reporter, StreamReporter};
use striped_metrics::MetricsError;

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_counter_lines_are_tab_separated() {
    let registry = Arc::new(MetricsRegistry::new());
    registry.counter("test.ctr.1").unwrap().inc(10);
    registry.counter("test.ctr.2").unwrap().inc(15);

    let reporter = StreamReporter::new(Vec::new(), registry);
    reporter.report().unwrap();

    assert_eq!(
        String::from_utf8(reporter.into_inner()).unwrap(),
        "test.ctr.1\t10\ntest.ctr.2\t15\n"
    );
}

#[test]
fn test_histogram_and_timer_lines() {
    let registry = Arc::new(MetricsRegistry::new());
    registry.histogram("sizes").unwrap().update(7);
    registry.timer("calls").unwrap();

    let reporter = StreamReporter::new(Vec::new(), registry);
    reporter.report().unwrap();

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let keys: Vec<&str> = output
        .lines()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec![
            "sizes.count",
            "sizes.p75",
            "sizes.p95",
            "sizes.p99",
            "calls.count",
            "calls.m1",
            "calls.m5",
            "calls.m15",
            "calls.p75",
            "calls.p95",
            "calls.p99",
        ]
    );
    assert!(output.starts_with("sizes.count\t1\nsizes.p75\t7\n"));
}

#[test]
fn test_repeated_reports_append() {
    let registry = Arc::new(MetricsRegistry::new());
    let counter = registry.counter("n").unwrap();
    let reporter = StreamReporter::new(Vec::new(), registry);

    reporter.report().unwrap();
    counter.inc(1);
    reporter.report().unwrap();

    assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "n\t0\nn\t1\n");
}

#[test]
fn test_write_failures_surface_as_report_errors() {
    let registry = Arc::new(MetricsRegistry::new());
    registry.counter("n").unwrap();

    let stream = StreamReporter::new(BrokenPipe, registry.clone());
    assert!(matches!(stream.report(), Err(MetricsError::Report(_))));

    let json = JsonReporter::new(BrokenPipe, registry);
    assert!(matches!(json.report(), Err(MetricsError::Report(_))));
}

#[test]
fn test_json_lines_follow_registry() {
    let registry = Arc::new(MetricsRegistry::new());
    registry.gauge("temp").unwrap().set(21);
    let reporter = JsonReporter::new(Vec::new(), registry);

    reporter.report().unwrap();

    assert_eq!(
        String::from_utf8(reporter.into_inner()).unwrap(),
        "{\"gauges\":{\"temp\":21}}\n"
    );
}
