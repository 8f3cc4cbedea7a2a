/*!
 * Scheduled Reporter Tests
 */

use parking_lot::Mutex;
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use striped_metrics::metrics::MetricsRegistry;
use striped_metrics::reporting::{Reporter, ScheduledReporter, StreamReporter, TracingReporter};
use striped_metrics::Result;

/// Captures the name of the thread each report runs on
#[derive(Default)]
struct ThreadRecorder {
    threads: Mutex<Vec<String>>,
}

impl Reporter for ThreadRecorder {
    fn report(&self) -> Result<()> {
        let name = thread::current().name().unwrap_or("<unnamed>").to_string();
        self.threads.lock().push(name);
        Ok(())
    }
}

fn wait_for(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
#[serial]
fn test_reports_periodically_on_named_thread() {
    let recorder = Arc::new(ThreadRecorder::default());
    let scheduled = ScheduledReporter::new(recorder.clone(), Duration::from_millis(10));

    scheduled.start().unwrap();
    assert!(wait_for(
        || recorder.threads.lock().len() >= 3,
        Duration::from_secs(5)
    ));
    scheduled.stop();

    let threads = recorder.threads.lock().clone();
    assert!(threads.iter().all(|name| name == "metrics-reporter"));
}

#[test]
#[serial]
fn test_no_reports_after_stop() {
    let recorder = Arc::new(ThreadRecorder::default());
    let scheduled = ScheduledReporter::new(recorder.clone(), Duration::from_millis(5));

    scheduled.start().unwrap();
    assert!(wait_for(
        || !recorder.threads.lock().is_empty(),
        Duration::from_secs(5)
    ));
    scheduled.stop();

    let after_stop = recorder.threads.lock().len();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(recorder.threads.lock().len(), after_stop);
}

#[test]
#[serial]
fn test_restart_after_stop() {
    let recorder = Arc::new(ThreadRecorder::default());
    let scheduled = ScheduledReporter::new(recorder.clone(), Duration::from_millis(5));

    scheduled.start().unwrap();
    scheduled.stop();
    let before = recorder.threads.lock().len();

    scheduled.start().unwrap();
    assert!(wait_for(
        || recorder.threads.lock().len() > before,
        Duration::from_secs(5)
    ));
}

#[test]
fn test_drop_stops_the_thread() {
    let recorder = Arc::new(ThreadRecorder::default());
    {
        let scheduled = ScheduledReporter::new(recorder.clone(), Duration::from_secs(3600));
        scheduled.start().unwrap();
    }
    // Only the test's handle remains once the reporter thread has exited
    assert_eq!(Arc::strong_count(&recorder), 1);
}

#[test]
fn test_wraps_stream_and_tracing_reporters() {
    let registry = Arc::new(MetricsRegistry::new());
    registry.counter("c").unwrap().inc(1);

    let stream = ScheduledReporter::new(
        Arc::new(StreamReporter::new(Vec::new(), registry.clone())),
        Duration::from_secs(60),
    );
    stream.report_now().unwrap();

    let traced = ScheduledReporter::new(
        Arc::new(TracingReporter::new(registry)),
        Duration::from_secs(60),
    );
    traced.report_now().unwrap();
}
