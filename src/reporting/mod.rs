/*!
 * Reporting Module
 * Publishing registry contents to streams, JSON and tracing
 */

pub mod json;
pub mod scheduled;
pub mod stream;
pub mod trace;
pub mod traits;

pub use json::JsonReporter;
pub use scheduled::ScheduledReporter;
pub use stream::StreamReporter;
pub use trace::TracingReporter;
pub use traits::Reporter;
