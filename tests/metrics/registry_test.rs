/*!
 * Registry Tests
 */

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use striped_metrics::metrics::{MetricsRegistry, RegistrySnapshot};
use striped_metrics::{MetricKind, MetricsError};

#[test]
fn test_concurrent_lookups_share_one_counter() {
    let registry = Arc::new(MetricsRegistry::new());

    thread::scope(|s| {
        for _ in 0..8 {
            let registry = &registry;
            s.spawn(move || {
                let counter = registry.counter("requests").unwrap();
                for _ in 0..1_000 {
                    counter.inc(1);
                }
            });
        }
    });

    assert_eq!(registry.counters().len(), 1);
    assert_eq!(registry.counter("requests").unwrap().count(), 8_000);
}

#[test]
fn test_every_kind_conflicts_with_every_other() {
    let registry = MetricsRegistry::new();
    registry.histogram("latency").unwrap();

    assert!(matches!(
        registry.counter("latency"),
        Err(MetricsError::NameConflict { existing: MetricKind::Histogram, .. })
    ));
    assert!(matches!(
        registry.gauge("latency"),
        Err(MetricsError::NameConflict { requested: MetricKind::Gauge, .. })
    ));
    assert!(matches!(
        registry.meter("latency"),
        Err(MetricsError::NameConflict { .. })
    ));
    assert!(matches!(
        registry.timer("latency"),
        Err(MetricsError::NameConflict { .. })
    ));
    assert!(registry.histogram("latency").is_ok());
}

#[test]
fn test_removed_handles_keep_working() {
    let registry = MetricsRegistry::new();
    let counter = registry.counter("jobs").unwrap();
    counter.inc(2);

    assert!(registry.remove("jobs"));
    counter.inc(3);
    assert_eq!(counter.count(), 5);

    let fresh = registry.counter("jobs").unwrap();
    assert_eq!(fresh.count(), 0);
}

#[test]
fn test_snapshot_serializes_and_parses_back() {
    let registry = MetricsRegistry::new();
    registry.counter("hits").unwrap().inc(4);
    registry.gauge("depth").unwrap().set(9);
    let histogram = registry.histogram("sizes").unwrap();
    for value in 1..=5 {
        histogram.update(value);
    }

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.counters["hits"], 4);
    assert_eq!(snapshot.gauges["depth"], 9);
    assert_eq!(snapshot.histograms["sizes"].count, 5);
    assert_eq!(snapshot.histograms["sizes"].summary.min, 1);
    assert_eq!(snapshot.histograms["sizes"].summary.max, 5);
    assert!(snapshot.meters.is_empty());

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(!json.contains("meters"));
    let parsed: RegistrySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.counters, snapshot.counters);
    assert_eq!(parsed.gauges, snapshot.gauges);
    assert_eq!(parsed.histograms["sizes"].count, 5);
}
