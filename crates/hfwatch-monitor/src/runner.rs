//! The transfer orchestrator.
//!
//! Drives one run: emits the lifecycle events, sequences the per-file
//! transfers (strictly one at a time, matching the collaborator's
//! one-connection semantics), runs a poller alongside each in-flight file,
//! and keeps the authoritative byte accounting.

use std::sync::{Arc, Mutex, PoisonError};

use hfwatch_core::ports::{FileTransferPort, ProgressEventSink};
use hfwatch_core::{MonitorResult, ProgressEvent, TransferPlan};

use crate::config::MonitorConfig;
use crate::poller::PartialFilePoller;
use crate::progress::RunProgress;
use crate::staging::StagingLocation;

/// Orchestrates one transfer run against a plan.
pub struct TransferRunner {
    transfer: Arc<dyn FileTransferPort>,
    events: Arc<dyn ProgressEventSink>,
    config: MonitorConfig,
}

impl TransferRunner {
    /// Create a runner from its collaborators.
    pub fn new(
        transfer: Arc<dyn FileTransferPort>,
        events: Arc<dyn ProgressEventSink>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            transfer,
            events,
            config,
        }
    }

    /// Run the plan to completion or first failure.
    ///
    /// Emits exactly one `Start`, one `FileStarted` per file in plan order,
    /// and exactly one terminal event. The first transfer failure ends the
    /// run: no further files, no cleanup of partially written data.
    pub async fn run(&self, plan: &TransferPlan, staging: &StagingLocation) -> MonitorResult<()> {
        let total_bytes = plan.total_bytes();
        tracing::info!(files = plan.len(), total_bytes, "starting transfer run");
        self.events.emit(ProgressEvent::start(total_bytes));

        let progress = Arc::new(Mutex::new(RunProgress::new(total_bytes)));

        for file in &plan.files {
            self.events
                .emit(ProgressEvent::file_started(&file.path, file.size_bytes));
            progress
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .begin_file(file);

            let poller = self.config.polling_enabled.then(|| {
                PartialFilePoller::spawn(
                    staging.clone(),
                    file.blob_id.clone(),
                    self.config.poll_interval,
                    Arc::clone(&progress),
                    Arc::clone(&self.events),
                )
            });

            let result = self.transfer.transfer(file).await;

            // The poller must never block completion; its join is bounded.
            if let Some(poller) = poller {
                poller.stop(self.config.stop_grace).await;
            }

            match result {
                Ok(()) => {
                    let event = progress
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .finish_file();
                    if let Some(event) = event {
                        self.events.emit(event);
                    }
                    tracing::debug!(file = %file.path, "file transferred");
                }
                Err(err) => {
                    tracing::warn!(file = %file.path, reason = err.reason(), "transfer failed, aborting run");
                    self.events.emit(ProgressEvent::error(err.reason()));
                    return Err(err);
                }
            }
        }

        tracing::info!("transfer run complete");
        self.events.emit(ProgressEvent::complete());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hfwatch_core::{FileEntry, MonitorError};

    use crate::sink::CaptureSink;

    struct NoopTransfer;

    #[async_trait]
    impl FileTransferPort for NoopTransfer {
        async fn transfer(&self, _file: &FileEntry) -> MonitorResult<()> {
            Ok(())
        }
    }

    struct FailOn {
        path: &'static str,
        reason: &'static str,
    }

    #[async_trait]
    impl FileTransferPort for FailOn {
        async fn transfer(&self, file: &FileEntry) -> MonitorResult<()> {
            if file.path == self.path {
                Err(MonitorError::transfer(&file.path, self.reason))
            } else {
                Ok(())
            }
        }
    }

    fn runner_with(transfer: Arc<dyn FileTransferPort>) -> (TransferRunner, CaptureSink) {
        let capture = CaptureSink::new();
        let runner = TransferRunner::new(
            transfer,
            Arc::new(capture.clone()),
            MonitorConfig::new().with_polling_enabled(false),
        );
        (runner, capture)
    }

    fn staging() -> StagingLocation {
        StagingLocation::new("/nonexistent/blobs")
    }

    #[tokio::test]
    async fn successful_run_emits_full_sequence() {
        let plan = TransferPlan::new(vec![
            FileEntry::new("a.bin", 100),
            FileEntry::new("b.bin", 200),
        ]);
        let (runner, capture) = runner_with(Arc::new(NoopTransfer));

        runner.run(&plan, &staging()).await.unwrap();

        let events = capture.events();
        assert_eq!(events[0], ProgressEvent::start(300));
        assert_eq!(events[1], ProgressEvent::file_started("a.bin", 100));
        assert_eq!(*events.last().unwrap(), ProgressEvent::complete());

        // Exactly one terminal event, and it is last
        let terminals = events.iter().filter(|e| e.is_terminal()).count();
        assert_eq!(terminals, 1);

        // FileStarted events appear in plan order
        let starts: Vec<&ProgressEvent> = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::FileStarted { .. }))
            .collect();
        assert_eq!(starts.len(), 2);
        assert_eq!(*starts[0], ProgressEvent::file_started("a.bin", 100));
        assert_eq!(*starts[1], ProgressEvent::file_started("b.bin", 200));
    }

    #[tokio::test]
    async fn completion_accounting_uses_declared_sizes() {
        let plan = TransferPlan::new(vec![
            FileEntry::new("a.bin", 100),
            FileEntry::new("b.bin", 200),
        ]);
        let (runner, capture) = runner_with(Arc::new(NoopTransfer));

        runner.run(&plan, &staging()).await.unwrap();

        let downloaded: Vec<u64> = capture
            .events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress {
                    downloaded_bytes, ..
                } => Some(*downloaded_bytes),
                _ => None,
            })
            .collect();
        assert_eq!(downloaded, vec![100, 300]);
    }

    #[tokio::test]
    async fn failure_on_second_file_stops_the_run() {
        let plan = TransferPlan::new(vec![
            FileEntry::new("a.bin", 100),
            FileEntry::new("b.bin", 200),
            FileEntry::new("c.bin", 300),
        ]);
        let (runner, capture) = runner_with(Arc::new(FailOn {
            path: "b.bin",
            reason: "connection reset",
        }));

        let err = runner.run(&plan, &staging()).await.unwrap_err();
        assert_eq!(err.reason(), "connection reset");

        let events = capture.events();
        assert_eq!(events[0], ProgressEvent::start(600));
        assert_eq!(
            *events.last().unwrap(),
            ProgressEvent::error("connection reset")
        );

        // b.bin began transferring, c.bin never did
        assert!(events.contains(&ProgressEvent::file_started("b.bin", 200)));
        assert!(!events.contains(&ProgressEvent::file_started("c.bin", 300)));
        assert!(!events.contains(&ProgressEvent::complete()));
    }

    #[tokio::test]
    async fn empty_plan_starts_and_completes() {
        let plan = TransferPlan::default();
        let (runner, capture) = runner_with(Arc::new(NoopTransfer));

        runner.run(&plan, &staging()).await.unwrap();

        assert_eq!(
            capture.events(),
            vec![ProgressEvent::start(0), ProgressEvent::complete()]
        );
    }

    #[tokio::test]
    async fn polling_disabled_still_reports_whole_files() {
        let plan = TransferPlan::new(vec![FileEntry::new("a.bin", 100)]);
        let (runner, capture) = runner_with(Arc::new(NoopTransfer));

        runner.run(&plan, &staging()).await.unwrap();

        let progress_events = capture
            .events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Progress { .. }))
            .count();
        assert_eq!(progress_events, 1);
    }
}
