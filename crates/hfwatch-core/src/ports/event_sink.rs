//! Progress event sink port.
//!
//! Abstracts event emission so the monitor never couples to a transport
//! (stdout lines, progress bar, capture buffer in tests).

use crate::transfer::ProgressEvent;

/// Port for emitting progress events.
///
/// Implementations must preserve emission order and must not block the
/// caller beyond writing and flushing a single event.
pub trait ProgressEventSink: Send + Sync {
    /// Emit one event.
    fn emit(&self, event: ProgressEvent);

    /// Clone this sink into a boxed trait object.
    ///
    /// Enables cloning of `Arc<dyn ProgressEventSink>` consumers without
    /// requiring the underlying type to implement `Clone`.
    fn clone_box(&self) -> Box<dyn ProgressEventSink>;
}

/// A no-op sink for tests and contexts where emission is optional.
#[derive(Debug, Clone, Default)]
pub struct NoopEventSink;

impl NoopEventSink {
    /// Create a new no-op sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProgressEventSink for NoopEventSink {
    fn emit(&self, _event: ProgressEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn ProgressEventSink> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn noop_sink_accepts_events() {
        let sink = NoopEventSink::new();
        sink.emit(ProgressEvent::start(100));
        sink.emit(ProgressEvent::complete());
    }

    #[test]
    fn noop_sink_clone_box() {
        let sink = NoopEventSink::new();
        let _boxed: Box<dyn ProgressEventSink> = sink.clone_box();
    }

    #[test]
    fn arc_sink_is_usable() {
        let sink: Arc<dyn ProgressEventSink> = Arc::new(NoopEventSink::new());
        sink.emit(ProgressEvent::error("boom"));
    }
}
