//! Progress events - discriminated union for everything a run emits.
//!
//! The event stream is the only externally observable state of a run. For a
//! given run there is exactly one `Start`, one `FileStarted` per planned file
//! (in plan order), zero or more `Progress` events per file, and exactly one
//! terminal event (`Complete` or `Error`).

use serde::{Deserialize, Serialize};

/// Single discriminated union for all transfer progress events.
///
/// Serialized one event per line; a tailing consumer parses each line
/// independently:
///
/// ```json
/// {"event":"start","total_bytes":300}
/// {"event":"file_started","path":"model.safetensors","size_bytes":100}
/// {"event":"progress","percent":16,"downloaded_bytes":50,"total_bytes":300,...}
/// {"event":"complete"}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A run has started.
    Start {
        /// Sum of all declared file sizes in the plan.
        total_bytes: u64,
    },

    /// The next file in plan order is about to be transferred.
    FileStarted {
        /// Path of the file within the artifact.
        path: String,
        /// Declared size of the file in bytes.
        size_bytes: u64,
    },

    /// Byte-level progress for the run.
    Progress {
        /// Whole-number percentage of the run, floored (0 when total is 0).
        percent: u8,
        /// Cumulative bytes accounted for across the run.
        downloaded_bytes: u64,
        /// Sum of all declared file sizes in the plan.
        total_bytes: u64,
        /// Estimated seconds remaining; absent until a rate is established.
        #[serde(skip_serializing_if = "Option::is_none")]
        eta_seconds: Option<u64>,
        /// Path of the file currently in flight.
        #[serde(skip_serializing_if = "Option::is_none")]
        current_file: Option<String>,
        /// Observed bytes of the in-flight file.
        current_file_bytes: u64,
        /// Declared size of the in-flight file.
        current_file_total: u64,
    },

    /// All files transferred successfully.
    Complete,

    /// The run failed; no further files are attempted.
    Error {
        /// Human-readable reason from the failing collaborator.
        message: String,
    },
}

impl ProgressEvent {
    /// Create a run start event.
    #[must_use]
    pub const fn start(total_bytes: u64) -> Self {
        Self::Start { total_bytes }
    }

    /// Create a file started event.
    pub fn file_started(path: impl Into<String>, size_bytes: u64) -> Self {
        Self::FileStarted {
            path: path.into(),
            size_bytes,
        }
    }

    /// Create a progress event, computing the floored percentage.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress(
        downloaded_bytes: u64,
        total_bytes: u64,
        eta_seconds: Option<u64>,
        current_file: Option<String>,
        current_file_bytes: u64,
        current_file_total: u64,
    ) -> Self {
        let percent = if total_bytes == 0 {
            0
        } else {
            ((downloaded_bytes as f64 / total_bytes as f64) * 100.0).floor() as u8
        };

        Self::Progress {
            percent,
            downloaded_bytes,
            total_bytes,
            eta_seconds,
            current_file,
            current_file_bytes,
            current_file_total,
        }
    }

    /// Create the success terminal event.
    #[must_use]
    pub const fn complete() -> Self {
        Self::Complete
    }

    /// Create the failure terminal event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Short kind string for logging and wire naming.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::FileStarted { .. } => "file_started",
            Self::Progress { .. } => "progress",
            Self::Complete => "complete",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this event ends a run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_constructor_floors_percent() {
        let event = ProgressEvent::progress(115, 1000, Some(7), None, 115, 1000);
        match event {
            ProgressEvent::Progress { percent, .. } => assert_eq!(percent, 11),
            _ => panic!("expected Progress"),
        }
    }

    #[test]
    fn progress_with_zero_total_is_zero_percent() {
        let event = ProgressEvent::progress(0, 0, None, None, 0, 0);
        match event {
            ProgressEvent::Progress { percent, .. } => assert_eq!(percent, 0),
            _ => panic!("expected Progress"),
        }
    }

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_string(&ProgressEvent::start(300)).unwrap();
        assert_eq!(json, r#"{"event":"start","total_bytes":300}"#);

        let json = serde_json::to_string(&ProgressEvent::complete()).unwrap();
        assert_eq!(json, r#"{"event":"complete"}"#);
    }

    #[test]
    fn eta_and_current_file_omitted_when_absent() {
        let json =
            serde_json::to_string(&ProgressEvent::progress(50, 300, None, None, 50, 100)).unwrap();
        assert!(!json.contains("eta_seconds"));
        assert!(!json.contains("current_file\""));
    }

    #[test]
    fn round_trips_through_json() {
        let event = ProgressEvent::progress(
            165,
            300,
            Some(3),
            Some("model.safetensors".to_string()),
            65,
            200,
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn terminal_classification() {
        assert!(ProgressEvent::complete().is_terminal());
        assert!(ProgressEvent::error("boom").is_terminal());
        assert!(!ProgressEvent::start(1).is_terminal());
        assert!(!ProgressEvent::file_started("a", 1).is_terminal());
    }

    #[test]
    fn kind_names_match_wire_tags() {
        assert_eq!(ProgressEvent::start(0).kind(), "start");
        assert_eq!(ProgressEvent::error("x").kind(), "error");
    }
}
