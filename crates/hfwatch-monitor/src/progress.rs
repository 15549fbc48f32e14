//! Run-scoped progress state.
//!
//! One `RunProgress` lives for one transfer run, shared between the
//! orchestrator and the currently active poller. It replaces the ambient
//! mutable fields a progress callback object would otherwise smuggle between
//! callbacks: the authoritative completed-bytes base, the in-flight file
//! context, the run clock, and the rate estimator.

use std::time::Instant;

use hfwatch_core::{FileEntry, ProgressEvent, RateEstimator};

/// Mutable progress state for one run.
///
/// Completion is authoritative over polling: observed in-flight sizes are
/// clamped to the file's declared size and only ever move forward, so the
/// aggregate byte count never regresses - not within a file, and not across
/// the completion accounting step.
#[derive(Debug)]
pub struct RunProgress {
    total_bytes: u64,
    completed_bytes: u64,
    current: Option<CurrentFile>,
    started_at: Instant,
    estimator: RateEstimator,
}

#[derive(Debug)]
struct CurrentFile {
    path: String,
    size_bytes: u64,
    reported_bytes: u64,
}

impl RunProgress {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            completed_bytes: 0,
            current: None,
            started_at: Instant::now(),
            estimator: RateEstimator::new(),
        }
    }

    /// Enter a new in-flight file. Any previous file context is replaced.
    pub fn begin_file(&mut self, file: &FileEntry) {
        self.current = Some(CurrentFile {
            path: file.path.clone(),
            size_bytes: file.size_bytes,
            reported_bytes: 0,
        });
    }

    /// Record a polled size for the in-flight file.
    ///
    /// Returns an event only when the observation moves progress forward;
    /// shrinks and repeats are "no new data this tick".
    pub fn observe_current(&mut self, observed_bytes: u64) -> Option<ProgressEvent> {
        let elapsed = self.started_at.elapsed().as_secs_f64();

        let current = self.current.as_mut()?;
        let clamped = observed_bytes.min(current.size_bytes);
        if clamped <= current.reported_bytes {
            return None;
        }
        current.reported_bytes = clamped;

        let downloaded = self.completed_bytes + clamped;
        self.estimator.record(elapsed, downloaded);

        Some(ProgressEvent::progress(
            downloaded,
            self.total_bytes,
            self.estimator
                .eta_seconds(self.total_bytes.saturating_sub(downloaded)),
            Some(current.path.clone()),
            clamped,
            current.size_bytes,
        ))
    }

    /// Credit the in-flight file's declared size and leave the file scope.
    ///
    /// The declared size - not the last polled value - is what lands in the
    /// aggregate; polling may have under- or over-sampled near completion.
    pub fn finish_file(&mut self) -> Option<ProgressEvent> {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        let finished = self.current.take()?;

        self.completed_bytes += finished.size_bytes;
        self.estimator.record(elapsed, self.completed_bytes);

        Some(ProgressEvent::progress(
            self.completed_bytes,
            self.total_bytes,
            self.estimator
                .eta_seconds(self.total_bytes.saturating_sub(self.completed_bytes)),
            Some(finished.path),
            finished.size_bytes,
            finished.size_bytes,
        ))
    }

    /// Authoritative bytes credited from completed files.
    #[must_use]
    pub const fn completed_bytes(&self) -> u64 {
        self.completed_bytes
    }

    /// Total bytes of the plan this run tracks.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }
}
