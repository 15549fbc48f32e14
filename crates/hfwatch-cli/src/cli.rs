//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Monitor multi-file Hub downloads with byte-level progress events.
#[derive(Debug, Parser)]
#[command(name = "hfwatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a model repository, emitting progress events on stdout.
    Download(DownloadArgs),
    /// Enumerate a repository's transfer plan and print it as JSON.
    Plan(PlanArgs),
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Repository id (`owner/name`).
    pub repo_id: String,

    /// Git revision, tag, or commit to download.
    #[arg(long, default_value = "main")]
    pub revision: String,

    /// Hub token for private repositories.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Cache directory override (defaults to the Hub cache resolution).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Partial-file polling interval in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub poll_interval_ms: u64,

    /// Disable partial-file polling (whole-file progress granularity only).
    #[arg(long)]
    pub no_poll: bool,

    /// Omit the host-protocol line prefix from event output.
    #[arg(long, conflicts_with = "pretty")]
    pub no_prefix: bool,

    /// Render a human progress bar instead of machine-readable events.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Repository id (`owner/name`).
    pub repo_id: String,

    /// Git revision, tag, or commit to enumerate.
    #[arg(long, default_value = "main")]
    pub revision: String,

    /// Hub token for private repositories.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
