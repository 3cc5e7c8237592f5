//! Live progress reporting.
//!
//! The driver reports what it is doing through a [`ProgressSink`] so the CLI
//! can narrate the run in real time while the library stays free of terminal
//! concerns. Every method has a no-op default.

use crate::report::RouteOutcome;

/// Observer for driver progress.
pub trait ProgressSink {
    /// A new attempt for a route is starting.
    fn attempt_started(&self, _path: &str, _attempt: u32, _attempts: u32) {}

    /// The wait phase finished; which selectors rendered and which timed out.
    fn selectors_polled(&self, _path: &str, _found: &[String], _missing: &[String]) {}

    /// An attempt failed. `will_retry` is false on the final attempt.
    fn attempt_failed(&self, _path: &str, _attempt: u32, _error: &str, _will_retry: bool) {}

    /// A snapshot was validated and written.
    fn snapshot_written(&self, _path: &str, _bytes: usize, _warnings: &[String]) {}

    /// A route exhausted its attempts.
    fn route_failed(&self, _outcome: &RouteOutcome) {}
}

/// Sink that discards all progress.
pub struct NullProgress;

impl ProgressSink for NullProgress {}
