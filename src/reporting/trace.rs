/*!
 * Tracing Reporter
 * Emits each metric as a structured `info` event under the `metrics` target
 */

use super::traits::Reporter;
use crate::core::errors::Result;
use crate::metrics::MetricsRegistry;
use std::sync::Arc;
use tracing::info;

pub struct TracingReporter {
    registry: Arc<MetricsRegistry>,
}

impl TracingReporter {
    pub fn new(registry: Arc<MetricsRegistry>) -> Self {
        Self { registry }
    }
}

impl Reporter for TracingReporter {
    fn report(&self) -> Result<()> {
        let snapshot = self.registry.snapshot();

        for (name, count) in &snapshot.counters {
            info!(target: "metrics", kind = "counter", name = %name, count, "metric");
        }
        for (name, value) in &snapshot.gauges {
            info!(target: "metrics", kind = "gauge", name = %name, value, "metric");
        }
        for (name, meter) in &snapshot.meters {
            info!(
                target: "metrics",
                kind = "meter",
                name = %name,
                count = meter.count,
                mean_rate = meter.mean_rate,
                m1_rate = meter.m1_rate,
                m5_rate = meter.m5_rate,
                m15_rate = meter.m15_rate,
                "metric"
            );
        }
        for (name, histogram) in &snapshot.histograms {
            info!(
                target: "metrics",
                kind = "histogram",
                name = %name,
                count = histogram.count,
                p75 = histogram.summary.p75,
                p95 = histogram.summary.p95,
                p99 = histogram.summary.p99,
                "metric"
            );
        }
        for (name, timer) in &snapshot.timers {
            info!(
                target: "metrics",
                kind = "timer",
                name = %name,
                count = timer.count,
                m1_rate = timer.m1_rate,
                p75 = timer.summary.p75,
                p95 = timer.summary.p95,
                p99 = timer.summary.p99,
                "metric"
            );
        }

        Ok(())
    }
}
