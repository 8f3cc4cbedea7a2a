/*!
 * Scheduled Reporter
 * Runs another reporter on a fixed period from a background thread
 */

use super::traits::Reporter;
use crate::core::errors::{MetricsError, Result};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct Shared {
    running: Mutex<bool>,
    wake: Condvar,
}

pub struct ScheduledReporter {
    reporter: Arc<dyn Reporter>,
    interval: Duration,
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ScheduledReporter {
    pub fn new(reporter: Arc<dyn Reporter>, interval: Duration) -> Self {
        Self {
            reporter,
            interval,
            shared: Arc::new(Shared {
                running: Mutex::new(false),
                wake: Condvar::new(),
            }),
            handle: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        *self.shared.running.lock()
    }

    /// Start the reporting thread. A second call while running does nothing.
    pub fn start(&self) -> Result<()> {
        let mut handle = self.handle.lock();
        {
            let mut running = self.shared.running.lock();
            if *running {
                return Ok(());
            }
            *running = true;
        }

        let shared = Arc::clone(&self.shared);
        let reporter = Arc::clone(&self.reporter);
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("metrics-reporter".to_string())
            .spawn(move || run_loop(&shared, reporter.as_ref(), interval));

        match spawned {
            Ok(join) => {
                *handle = Some(join);
                debug!(interval_ms = interval.as_millis() as u64, "Scheduled reporter started");
                Ok(())
            }
            Err(e) => {
                *self.shared.running.lock() = false;
                Err(MetricsError::Report(format!(
                    "failed to spawn reporter thread: {e}"
                )))
            }
        }
    }

    /// Wake the thread and wait for it to exit
    pub fn stop(&self) {
        let mut handle = self.handle.lock();
        {
            let mut running = self.shared.running.lock();
            *running = false;
            self.shared.wake.notify_all();
        }
        if let Some(join) = handle.take() {
            if join.join().is_err() {
                warn!("Reporter thread panicked");
            }
            debug!("Scheduled reporter stopped");
        }
    }

    pub fn report_now(&self) -> Result<()> {
        self.reporter.report()
    }
}

impl Drop for ScheduledReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_loop(shared: &Shared, reporter: &dyn Reporter, interval: Duration) {
    loop {
        let deadline = Instant::now() + interval;
        {
            let mut running = shared.running.lock();
            while *running && Instant::now() < deadline {
                shared.wake.wait_until(&mut running, deadline);
            }
            if !*running {
                return;
            }
        }

        if let Err(e) = reporter.report() {
            warn!(error = %e, "Scheduled report failed");
        }
    }
}
