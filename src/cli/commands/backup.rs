//! Create bundles of every repository under the configured source directory

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use crate::bundle::report::{render_bundle_summary, render_failures};
use crate::bundle::{
    Batch, GitArchiver, JobExecutor, Operation, REPOSITORY_SEARCH_DEPTH, discover_repositories,
};
use crate::cli::Output;
use crate::config::Config;

pub const LONG_ABOUT: &str = "Create git bundles for all repositories found in the source directory.\n\n\
Repositories are searched up to two levels below REPO_DIR and bundled in parallel \
into OUTPUT_DIR as <name>.bundle.\n\n\
Environment Variables:\n  \
  REPO_DIR          Source directory for repositories (default: ~/git)\n  \
  OUTPUT_DIR        Output directory for bundles (default: system temp directory)\n  \
  MAX_JOBS          Maximum parallel jobs (default: auto-detect, max 8)";

#[derive(Args, Debug, Clone, Default)]
pub struct BackupArgs {
    /// Do not open the output directory when finished
    #[arg(long)]
    pub no_open: bool,
}

pub async fn execute(args: BackupArgs, config: &Config, output: &Output) -> Result<()> {
    output.header("Starting git bundling!");
    tracing::debug!("Repository directory: {}", config.repo_dir.display());
    tracing::debug!("Output directory: {}", config.output_dir.display());

    let archiver = GitArchiver::new();
    archiver.ensure_available()?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("failed to create output directory: {}", config.output_dir.display())
    })?;

    let jobs = discover_repositories(&config.repo_dir, REPOSITORY_SEARCH_DEPTH, &config.output_dir)
        .context("failed to find git repositories")?;

    if jobs.is_empty() {
        output.line(&format!("No repositories found in {}", config.repo_dir.display()));
        return Ok(());
    }

    let batch = Batch::new(
        JobExecutor::new(Arc::new(archiver), Operation::Bundle),
        config.workers(),
    );
    let workers = batch.workers();

    let summary = tokio::task::spawn_blocking(move || batch.run(jobs))
        .await
        .context("bundle workers did not finish")??;

    output.block(&render_failures(Operation::Bundle, &summary));
    if summary.failed > 0 {
        output.blank_line();
    }
    output.block(&render_bundle_summary(&summary, workers));
    output.blank_line();

    output.line("Finished!");
    output.blank_line();
    output.line("To extract the bundles, use the following command:");
    output.line("    git clone <bundle-file> <destination-directory>");

    if !args.no_open && atty::is(atty::Stream::Stdout) {
        open_output_dir(&config.output_dir, output);
    }

    Ok(())
}

/// Reveal the output directory in the platform file manager
fn open_output_dir(dir: &Path, output: &Output) {
    let opener = match std::env::consts::OS {
        "linux" => "xdg-open",
        "macos" => "open",
        _ => {
            output.line(&format!("Please open the output directory manually: {}", dir.display()));
            return;
        }
    };

    match Command::new(opener).arg(dir).status() {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!("{} exited with {}", opener, status),
        Err(e) => output.warning(&format!("Could not open {}: {}", dir.display(), e)),
    }
}
