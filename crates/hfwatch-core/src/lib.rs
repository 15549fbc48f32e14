//! Core domain types and port definitions for hfwatch.
//!
//! This crate contains pure data types, the progress event model, the rate
//! estimator, and the trait abstractions (ports) the monitor expects from
//! infrastructure. No I/O, networking, or runtime dependencies allowed.

pub mod ports;
pub mod transfer;

// Re-export commonly used types for convenience
pub use ports::{FileTransferPort, NoopEventSink, ProgressEventSink};
pub use transfer::{
    FileEntry, MonitorError, MonitorResult, ProgressEvent, RateEstimator, TransferPlan,
};
