//! The per-file background polling task.
//!
//! While one file's transfer is in flight, a poller ticks on a fixed
//! interval, observes the staging directory, and pushes any forward movement
//! through the shared run progress into the event sink.
//!
//! The stop signal is advisory (checked once per tick) and the join is
//! bounded by the orchestrator: a stuck poller is abandoned, never awaited
//! indefinitely.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use hfwatch_core::ports::ProgressEventSink;

use crate::progress::RunProgress;
use crate::staging::StagingLocation;

/// Handle to a running poller task.
pub struct PartialFilePoller {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PartialFilePoller {
    /// Spawn a poller for one in-flight file.
    ///
    /// `blob_id` selects the deterministic `.incomplete` candidate; without
    /// it the poller falls back to scanning the staging directory.
    pub fn spawn(
        staging: StagingLocation,
        blob_id: Option<String>,
        interval: Duration,
        progress: Arc<Mutex<RunProgress>>,
        events: Arc<dyn ProgressEventSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Some(size) = staging.observed_size(blob_id.as_deref()) {
                            let event = progress
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .observe_current(size);
                            if let Some(event) = event {
                                events.emit(event);
                            }
                        }
                    }
                }
            }
        });

        Self { cancel, task }
    }

    /// Signal the poller to stop and wait for it, bounded by `grace`.
    ///
    /// If the task does not acknowledge within the grace period it is
    /// abandoned; it will still exit at its next tick, but the run moves on
    /// without it.
    pub async fn stop(self, grace: Duration) {
        self.cancel.cancel();
        match tokio::time::timeout(grace, self.task).await {
            Ok(Ok(())) => {}
            Ok(Err(join_err)) => {
                tracing::debug!(%join_err, "poller task ended abnormally");
            }
            Err(_) => {
                tracing::warn!("poller did not stop within grace period; abandoning it");
            }
        }
    }
}
