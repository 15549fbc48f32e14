//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: the Hub
//! client for enumeration, the Hub transfer adapter, the monitor, and the
//! chosen event sink. Logs go to stderr; stdout belongs to the event stream.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::Parser;

use hfwatch_core::ports::ProgressEventSink;
use hfwatch_core::MonitorError;
use hfwatch_hub::{DefaultHubClient, HubConfig, HubTransfer, RepoRef, blobs_dir};
use hfwatch_monitor::{
    HOST_PROTOCOL_PREFIX, JsonLineSink, MonitorConfig, StagingLocation, TransferRunner,
};

mod cli;
mod pretty;

use cli::{Cli, Commands, DownloadArgs, PlanArgs};
use pretty::PrettyProgressSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; ignore a missing file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Download(args) => run_download(args).await,
        Commands::Plan(args) => run_plan(args).await,
    }
}

fn parse_repo(repo_id: &str) -> anyhow::Result<RepoRef> {
    RepoRef::parse(repo_id)
        .ok_or_else(|| anyhow!("invalid repository id '{repo_id}': expected owner/name"))
}

async fn run_download(args: DownloadArgs) -> anyhow::Result<()> {
    let repo = parse_repo(&args.repo_id)?;

    let mut config = HubConfig::new();
    if let Some(token) = args.token {
        config = config.with_token(token);
    }
    if let Some(dir) = args.cache_dir {
        config = config.with_cache_dir(dir);
    }

    // Enumeration failures surface here, before any event is emitted
    let client = DefaultHubClient::new(config.clone());
    let plan = client
        .transfer_plan(&repo, &args.revision)
        .await
        .map_err(MonitorError::from)
        .with_context(|| format!("failed to enumerate {repo}"))?;

    tracing::debug!(
        files = plan.len(),
        total_bytes = plan.total_bytes(),
        "enumerated transfer plan"
    );

    let transfer = HubTransfer::new(&repo, &args.revision, &config);
    let staging = StagingLocation::new(blobs_dir(transfer.cache_dir(), &repo));

    let sink: Arc<dyn ProgressEventSink> = if args.pretty {
        Arc::new(PrettyProgressSink::new())
    } else {
        let mut sink = JsonLineSink::stdout();
        if !args.no_prefix {
            sink = sink.with_prefix(HOST_PROTOCOL_PREFIX);
        }
        Arc::new(sink)
    };

    let monitor_config = MonitorConfig::new()
        .with_poll_interval(Duration::from_millis(args.poll_interval_ms))
        .with_polling_enabled(!args.no_poll);

    let runner = TransferRunner::new(Arc::new(transfer), sink, monitor_config);
    runner.run(&plan, &staging).await.context("download failed")?;

    Ok(())
}

async fn run_plan(args: PlanArgs) -> anyhow::Result<()> {
    let repo = parse_repo(&args.repo_id)?;

    let mut config = HubConfig::new();
    if let Some(token) = args.token {
        config = config.with_token(token);
    }

    let client = DefaultHubClient::new(config);
    let plan = client
        .transfer_plan(&repo, &args.revision)
        .await
        .map_err(MonitorError::from)
        .with_context(|| format!("failed to enumerate {repo}"))?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_repo_accepts_owner_name() {
        let repo = parse_repo("coqui/XTTS-v2").unwrap();
        assert_eq!(repo.id(), "coqui/XTTS-v2");
    }

    #[test]
    fn parse_repo_rejects_bare_names() {
        let err = parse_repo("no-owner").unwrap_err();
        assert!(err.to_string().contains("expected owner/name"));
    }
}
