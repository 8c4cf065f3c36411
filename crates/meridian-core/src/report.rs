//! Error-reporting abstraction.
//!
//! The error formatter forwards translated unexpected failures to an
//! optional reporter (Sentry-style error tracking, a log sink, a metrics
//! counter). Reporting is best-effort: the formatter isolates reporter
//! panics and a reporter must never block the response path.

use crate::error::Failure;

/// A fire-and-forget sink for unexpected failures.
///
/// Implementations must be cheap and non-blocking; anything slow belongs on
/// a background task owned by the implementation. Panics raised by
/// `capture` are caught and logged by the caller, never propagated.
pub trait ErrorReporter: Send + Sync + 'static {
    /// Records one failure occurrence.
    fn capture(&self, failure: &dyn Failure);
}

/// A reporter that emits captured failures as `tracing` error events.
///
/// The default choice when no external error-tracking integration is
/// configured but failures should still land in the structured logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Creates a new tracing-backed reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingReporter {
    fn capture(&self, failure: &dyn Failure) {
        tracing::error!(error = %failure, "captured unexpected failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("exploded")]
    struct Exploded;
    impl Failure for Exploded {}

    #[derive(Default)]
    struct CountingReporter {
        captured: Arc<AtomicUsize>,
    }

    impl ErrorReporter for CountingReporter {
        fn capture(&self, _failure: &dyn Failure) {
            self.captured.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_reporter_receives_failures() {
        let captured = Arc::new(AtomicUsize::new(0));
        let reporter = CountingReporter {
            captured: Arc::clone(&captured),
        };

        reporter.capture(&Exploded);
        reporter.capture(&Exploded);
        assert_eq!(captured.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_tracing_reporter_does_not_panic() {
        TracingReporter::new().capture(&Exploded);
    }
}
