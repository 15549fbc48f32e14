//! `HuggingFace` Hub adapter for hfwatch.
//!
//! Provides the two collaborators the monitor needs from the Hub:
//!
//! - enumeration: list a model repository's file tree with sizes and blob
//!   ids, producing a [`hfwatch_core::TransferPlan`]
//! - transfer: a blocking, callback-free per-file download backed by the
//!   `hf-hub` SDK, implementing [`hfwatch_core::FileTransferPort`]
//!
//! plus the cache-layout conventions the partial-file poller observes.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod parsing;
pub mod transfer;
mod url;

pub use cache::{blobs_dir, repo_folder_name, resolve_cache_dir};
pub use client::{DefaultHubClient, HubClient};
pub use config::{HubConfig, RepoRef};
pub use error::{HubError, HubResult};
pub use transfer::HubTransfer;
