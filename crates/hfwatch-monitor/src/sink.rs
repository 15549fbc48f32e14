//! Event sink implementations.
//!
//! The monitor's only output is its event stream; these sinks decide where
//! it lands. Each event becomes exactly one line, flushed immediately, so a
//! tailing consumer observes events in emission order with no reordering or
//! merging.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use hfwatch_core::ports::ProgressEventSink;
use hfwatch_core::ProgressEvent;

/// Line prefix the host process greps for on the shared output channel.
pub const HOST_PROTOCOL_PREFIX: &str = "MODEL_DOWNLOAD";

/// Sink writing one JSON line per event to a shared writer.
///
/// The writer sits behind a mutex so the orchestrator and the poller can
/// emit concurrently without interleaving lines.
#[derive(Clone)]
pub struct JsonLineSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    prefix: Option<String>,
}

impl JsonLineSink {
    /// Create a sink over an arbitrary writer.
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            prefix: None,
        }
    }

    /// Create a sink writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Prefix every line, e.g. with [`HOST_PROTOCOL_PREFIX`].
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl ProgressEventSink for JsonLineSink {
    fn emit(&self, event: ProgressEvent) {
        let json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, kind = event.kind(), "failed to serialize event");
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let result = match &self.prefix {
            Some(prefix) => writeln!(writer, "{prefix} {json}"),
            None => writeln!(writer, "{json}"),
        };
        if let Err(err) = result.and_then(|()| writer.flush()) {
            // A closed pipe must not take the transfer down with it
            tracing::warn!(%err, "failed to write event");
        }
    }

    fn clone_box(&self) -> Box<dyn ProgressEventSink> {
        Box::new(self.clone())
    }
}

/// Sink collecting events into memory.
///
/// Used by tests and by hosts that render the stream themselves.
#[derive(Clone, Default)]
pub struct CaptureSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl CaptureSink {
    /// Create an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressEventSink for CaptureSink {
    fn emit(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn clone_box(&self) -> Box<dyn ProgressEventSink> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shared buffer standing in for stdout.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_json_line_per_event() {
        let buf = SharedBuf::default();
        let sink = JsonLineSink::new(Box::new(buf.clone()));

        sink.emit(ProgressEvent::start(300));
        sink.emit(ProgressEvent::complete());

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"event":"start","total_bytes":300}"#);
        assert_eq!(lines[1], r#"{"event":"complete"}"#);
    }

    #[test]
    fn prefix_marks_every_line() {
        let buf = SharedBuf::default();
        let sink = JsonLineSink::new(Box::new(buf.clone())).with_prefix(HOST_PROTOCOL_PREFIX);

        sink.emit(ProgressEvent::start(1));

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.starts_with("MODEL_DOWNLOAD {"));
    }

    #[test]
    fn every_line_parses_independently() {
        let buf = SharedBuf::default();
        let sink = JsonLineSink::new(Box::new(buf.clone()));

        sink.emit(ProgressEvent::file_started("a.bin", 100));
        sink.emit(ProgressEvent::progress(50, 300, None, Some("a.bin".into()), 50, 100));
        sink.emit(ProgressEvent::error("connection reset"));

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        for line in output.lines() {
            let parsed: ProgressEvent = serde_json::from_str(line).unwrap();
            assert!(!parsed.kind().is_empty());
        }
    }

    #[test]
    fn capture_sink_preserves_order() {
        let sink = CaptureSink::new();
        sink.emit(ProgressEvent::start(10));
        sink.emit(ProgressEvent::complete());

        assert_eq!(
            sink.events(),
            vec![ProgressEvent::start(10), ProgressEvent::complete()]
        );
    }

    #[test]
    fn capture_sink_clones_share_the_buffer() {
        let sink = CaptureSink::new();
        let boxed = sink.clone_box();
        boxed.emit(ProgressEvent::start(5));

        assert_eq!(sink.events(), vec![ProgressEvent::start(5)]);
    }
}
