/*!
 * JSON Reporter
 * One serialized registry snapshot per line
 */

use super::traits::Reporter;
use crate::core::errors::Result;
use crate::metrics::MetricsRegistry;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

pub struct JsonReporter<W: Write + Send> {
    output: Mutex<W>,
    registry: Arc<MetricsRegistry>,
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(output: W, registry: Arc<MetricsRegistry>) -> Self {
        Self {
            output: Mutex::new(output),
            registry,
        }
    }

    pub fn into_inner(self) -> W {
        self.output.into_inner()
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn report(&self) -> Result<()> {
        let snapshot = self.registry.snapshot();
        let mut output = self.output.lock();
        serde_json::to_writer(&mut *output, &snapshot)?;
        output.write_all(b"\n")?;
        output.flush()?;
        Ok(())
    }
}
