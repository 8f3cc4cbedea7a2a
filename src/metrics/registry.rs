/*!
 * Metrics Registry
 * Named, shared metric handles with one namespace across kinds
 */

use super::counter::Counter;
use super::gauge::Gauge;
use super::histogram::Histogram;
use super::meter::Meter;
use super::snapshot::SnapshotSummary;
use super::timer::Timer;
use crate::core::errors::{MetricKind, MetricsError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

type Family<T> = BTreeMap<String, Arc<T>>;

#[derive(Default)]
struct Families {
    names: BTreeMap<String, MetricKind>,
    counters: Family<Counter>,
    gauges: Family<Gauge>,
    meters: Family<Meter>,
    histograms: Family<Histogram>,
    timers: Family<Timer>,
}

/// Registry of metrics keyed by name
///
/// Requesting an existing name of the same kind returns the shared handle.
/// Requesting it as a different kind fails with [`MetricsError::NameConflict`].
#[derive(Default)]
pub struct MetricsRegistry {
    families: RwLock<Families>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry
    pub fn global() -> Arc<MetricsRegistry> {
        static GLOBAL: std::sync::OnceLock<Arc<MetricsRegistry>> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(MetricsRegistry::new())).clone()
    }

    pub fn counter(&self, name: &str) -> Result<Arc<Counter>> {
        self.get_or_add(name, MetricKind::Counter, |f| &mut f.counters, Counter::new)
    }

    pub fn gauge(&self, name: &str) -> Result<Arc<Gauge>> {
        self.get_or_add(name, MetricKind::Gauge, |f| &mut f.gauges, Gauge::new)
    }

    pub fn meter(&self, name: &str) -> Result<Arc<Meter>> {
        self.get_or_add(name, MetricKind::Meter, |f| &mut f.meters, Meter::new)
    }

    pub fn histogram(&self, name: &str) -> Result<Arc<Histogram>> {
        self.get_or_add(name, MetricKind::Histogram, |f| &mut f.histograms, Histogram::new)
    }

    pub fn timer(&self, name: &str) -> Result<Arc<Timer>> {
        self.get_or_add(name, MetricKind::Timer, |f| &mut f.timers, Timer::new)
    }

    pub fn counters(&self) -> Family<Counter> {
        self.families.read().counters.clone()
    }

    pub fn gauges(&self) -> Family<Gauge> {
        self.families.read().gauges.clone()
    }

    pub fn meters(&self) -> Family<Meter> {
        self.families.read().meters.clone()
    }

    pub fn histograms(&self) -> Family<Histogram> {
        self.families.read().histograms.clone()
    }

    pub fn timers(&self) -> Family<Timer> {
        self.families.read().timers.clone()
    }

    /// Registered names in order
    pub fn names(&self) -> Vec<String> {
        self.families.read().names.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.families.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a metric of any kind. Outstanding handles stay usable.
    pub fn remove(&self, name: &str) -> bool {
        let mut families = self.families.write();
        let Some(kind) = families.names.remove(name) else {
            return false;
        };
        match kind {
            MetricKind::Counter => families.counters.remove(name).is_some(),
            MetricKind::Gauge => families.gauges.remove(name).is_some(),
            MetricKind::Meter => families.meters.remove(name).is_some(),
            MetricKind::Histogram => families.histograms.remove(name).is_some(),
            MetricKind::Timer => families.timers.remove(name).is_some(),
        }
    }

    /// Point-in-time values of every metric
    pub fn snapshot(&self) -> RegistrySnapshot {
        let families = self.families.read();
        RegistrySnapshot {
            counters: families
                .counters
                .iter()
                .map(|(name, c)| (name.clone(), c.count()))
                .collect(),
            gauges: families
                .gauges
                .iter()
                .map(|(name, g)| (name.clone(), g.value()))
                .collect(),
            meters: families
                .meters
                .iter()
                .map(|(name, m)| (name.clone(), MeterStats::of(m)))
                .collect(),
            histograms: families
                .histograms
                .iter()
                .map(|(name, h)| {
                    let stats = HistogramStats {
                        count: h.count(),
                        summary: h.snapshot().summary(),
                    };
                    (name.clone(), stats)
                })
                .collect(),
            timers: families
                .timers
                .iter()
                .map(|(name, t)| {
                    let stats = TimerStats {
                        count: t.count(),
                        mean_rate: t.mean_rate(),
                        m1_rate: t.m1_rate(),
                        m5_rate: t.m5_rate(),
                        m15_rate: t.m15_rate(),
                        summary: t.snapshot().summary(),
                    };
                    (name.clone(), stats)
                })
                .collect(),
        }
    }

    fn get_or_add<T>(
        &self,
        name: &str,
        kind: MetricKind,
        family: fn(&mut Families) -> &mut Family<T>,
        make: fn() -> T,
    ) -> Result<Arc<T>> {
        let mut families = self.families.write();

        if let Some(existing) = families.names.get(name).copied() {
            if existing != kind {
                return Err(MetricsError::NameConflict {
                    name: name.to_string(),
                    existing,
                    requested: kind,
                });
            }
            if let Some(metric) = family(&mut *families).get(name) {
                return Ok(metric.clone());
            }
        }

        let metric = Arc::new(make());
        families.names.insert(name.to_string(), kind);
        family(&mut *families).insert(name.to_string(), metric.clone());
        debug!(name, %kind, "Registered metric");
        Ok(metric)
    }
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("names", &self.families.read().names)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterStats {
    pub count: i64,
    pub mean_rate: f64,
    pub m1_rate: f64,
    pub m5_rate: f64,
    pub m15_rate: f64,
}

impl MeterStats {
    fn of(meter: &Meter) -> Self {
        Self {
            count: meter.count(),
            mean_rate: meter.mean_rate(),
            m1_rate: meter.m1_rate(),
            m5_rate: meter.m5_rate(),
            m15_rate: meter.m15_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramStats {
    pub count: i64,
    #[serde(flatten)]
    pub summary: SnapshotSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerStats {
    pub count: i64,
    pub mean_rate: f64,
    pub m1_rate: f64,
    pub m5_rate: f64,
    pub m15_rate: f64,
    #[serde(flatten)]
    pub summary: SnapshotSummary,
}

/// Serializable view of a registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub counters: BTreeMap<String, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gauges: BTreeMap<String, i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meters: BTreeMap<String, MeterStats>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub histograms: BTreeMap<String, HistogramStats>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub timers: BTreeMap<String, TimerStats>,
}
