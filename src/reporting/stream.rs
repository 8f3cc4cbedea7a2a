/*!
 * Stream Reporter
 * Tab-separated `name<TAB>value` lines written to any `Write`
 */

use super::traits::Reporter;
use crate::core::errors::Result;
use crate::metrics::MetricsRegistry;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

pub struct StreamReporter<W: Write + Send> {
    output: Mutex<W>,
    registry: Arc<MetricsRegistry>,
}

impl<W: Write + Send> StreamReporter<W> {
    pub fn new(output: W, registry: Arc<MetricsRegistry>) -> Self {
        Self {
            output: Mutex::new(output),
            registry,
        }
    }

    /// Recover the writer, e.g. to inspect a buffer
    pub fn into_inner(self) -> W {
        self.output.into_inner()
    }

    fn write_all(&self, out: &mut W) -> std::io::Result<()> {
        for (name, counter) in self.registry.counters() {
            writeln!(out, "{name}\t{}", counter.count())?;
        }

        for (name, gauge) in self.registry.gauges() {
            writeln!(out, "{name}\t{}", gauge.value())?;
        }

        for (name, meter) in self.registry.meters() {
            writeln!(out, "{name}.count\t{}", meter.count())?;
            writeln!(out, "{name}.mean\t{}", meter.mean_rate())?;
            writeln!(out, "{name}.m1\t{}", meter.m1_rate())?;
            writeln!(out, "{name}.m5\t{}", meter.m5_rate())?;
            writeln!(out, "{name}.m15\t{}", meter.m15_rate())?;
        }

        for (name, histogram) in self.registry.histograms() {
            let snapshot = histogram.snapshot();
            writeln!(out, "{name}.count\t{}", histogram.count())?;
            writeln!(out, "{name}.p75\t{}", snapshot.p75())?;
            writeln!(out, "{name}.p95\t{}", snapshot.p95())?;
            writeln!(out, "{name}.p99\t{}", snapshot.p99())?;
        }

        for (name, timer) in self.registry.timers() {
            let snapshot = timer.snapshot();
            writeln!(out, "{name}.count\t{}", timer.count())?;
            writeln!(out, "{name}.m1\t{}", timer.m1_rate())?;
            writeln!(out, "{name}.m5\t{}", timer.m5_rate())?;
            writeln!(out, "{name}.m15\t{}", timer.m15_rate())?;
            writeln!(out, "{name}.p75\t{}", snapshot.p75())?;
            writeln!(out, "{name}.p95\t{}", snapshot.p95())?;
            writeln!(out, "{name}.p99\t{}", snapshot.p99())?;
        }

        out.flush()
    }
}

impl<W: Write + Send> Reporter for StreamReporter<W> {
    fn report(&self) -> Result<()> {
        let mut output = self.output.lock();
        self.write_all(&mut *output)?;
        Ok(())
    }
}
