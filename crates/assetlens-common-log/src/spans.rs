//! Span and timing helpers.

use std::future::Future;
use std::path::Path;
use tracing::{info_span, Instrument, Span};

/// Span covering one parse of a catalog.
pub fn catalog_span(root: &Path) -> Span {
    info_span!("catalog", root = %root.display())
}

/// Span for a CLI command. A failure is recorded on its `error` field.
pub fn command_span(command: &str) -> Span {
    info_span!("command", name = %command, error = tracing::field::Empty)
}

/// Span for work on a single asset.
pub fn asset_span(kind: &str, path: &Path) -> Span {
    info_span!("asset", kind = %kind, path = %path.display())
}

/// Span for a file operation.
pub fn file_span(operation: &str, path: &Path) -> Span {
    info_span!("file", op = %operation, path = %path.display())
}

/// Instrument a future with a span.
pub fn instrument_future<F: Future>(future: F, span: Span) -> impl Future<Output = F::Output> {
    future.instrument(span)
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", tracing::field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Milliseconds since start.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Complete the timer and log its duration at debug level.
    pub fn finish(self) -> u128 {
        let elapsed = self.elapsed_ms();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %elapsed,
            "operation completed"
        );
        elapsed
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

/// Re-export of tracing::instrument for convenience.
pub use tracing::instrument;
