//! Transfer progress monitor.
//!
//! Reconstructs byte-level progress for multi-file downloads whose transfer
//! mechanism exposes no progress callback: a background poller watches the
//! staging directory where in-progress bytes accumulate, a run-scoped
//! tracker smooths rate samples and computes ETAs, and the orchestrator
//! drives the per-file sequence and the event stream.
//!
//! # Structure
//!
//! - `config` - monitor tuning knobs (poll interval, enable/disable, grace)
//! - `staging` - staging-directory conventions and size observation
//! - `poller` - the per-file background polling task
//! - `progress` - run-scoped progress state (byte base, estimator)
//! - `runner` - the transfer orchestrator
//! - `sink` - event sink implementations (JSON lines, capture)

pub mod config;
pub mod poller;
pub mod progress;
pub mod runner;
pub mod sink;
pub mod staging;

pub use config::MonitorConfig;
pub use poller::PartialFilePoller;
pub use progress::RunProgress;
pub use runner::TransferRunner;
pub use sink::{CaptureSink, HOST_PROTOCOL_PREFIX, JsonLineSink};
pub use staging::StagingLocation;
