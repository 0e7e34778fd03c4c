//! Restore repositories from a directory of bundle files

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::bundle::report::{render_failures, render_restore_summary};
use crate::bundle::{
    Batch, Confirmation, GitArchiver, JobExecutor, Operation, RestorePlan, confirm_overwrite,
    discover_bundles,
};
use crate::cli::Output;
use crate::config::Config;

pub const LONG_ABOUT: &str = "Restore git repositories from bundle files.\n\n\
Every .bundle file in the bundle directory is cloned into the destination directory. \
If repositories already exist at the destination you will be asked for confirmation \
unless --force is used; existing repositories are deleted before being restored.\n\n\
Arguments:\n  \
  bundle-dir        Directory containing .bundle files (default: OUTPUT_DIR)\n  \
  dest-dir          Destination directory for repositories (default: REPO_DIR)";

#[derive(Args, Debug, Clone, Default)]
pub struct RestoreArgs {
    /// Directory containing .bundle files
    #[arg(value_name = "BUNDLE_DIR")]
    pub bundle_dir: Option<PathBuf>,

    /// Destination directory for repositories
    #[arg(value_name = "DEST_DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Force overwrite without confirmation
    #[arg(short, long)]
    pub force: bool,
}

pub async fn execute(args: RestoreArgs, config: &Config, output: &Output) -> Result<()> {
    let bundle_dir = args.bundle_dir.unwrap_or_else(|| config.output_dir.clone());
    let dest_dir = args.dest_dir.unwrap_or_else(|| config.repo_dir.clone());

    output.header("Starting git bundle restoration!");
    tracing::debug!("Bundle directory: {}", bundle_dir.display());
    tracing::debug!("Destination directory: {}", dest_dir.display());

    if !bundle_dir.is_dir() {
        bail!("bundle directory '{}' does not exist", bundle_dir.display());
    }

    std::fs::create_dir_all(&dest_dir).with_context(|| {
        format!("failed to create destination directory: {}", dest_dir.display())
    })?;

    let archiver = GitArchiver::new();
    archiver.ensure_available()?;

    let jobs = discover_bundles(&bundle_dir, &dest_dir).context("failed to find bundle files")?;
    if jobs.is_empty() {
        output.line(&format!("No bundle files found in {}", bundle_dir.display()));
        return Ok(());
    }

    let plan = RestorePlan::partition(jobs);
    if plan.has_collisions() {
        if args.force {
            tracing::debug!("Force flag enabled, proceeding without confirmation");
        } else {
            let stdin = std::io::stdin();
            let answer = confirm_overwrite(
                &plan.colliding_names(),
                &mut stdin.lock(),
                &mut std::io::stdout(),
            )?;

            if answer == Confirmation::Cancelled {
                output.blank_line();
                output.line("Restore cancelled by user");
                return Ok(());
            }
        }
    }

    let batch = Batch::new(
        JobExecutor::new(Arc::new(archiver), Operation::Restore),
        config.workers(),
    );
    let jobs = plan.into_jobs();

    let summary = tokio::task::spawn_blocking(move || batch.run(jobs))
        .await
        .context("restore workers did not finish")??;

    output.block(&render_failures(Operation::Restore, &summary));
    if summary.failed > 0 {
        output.blank_line();
    }
    output.block(&render_restore_summary(&summary));
    output.blank_line();
    output.line(&format!("Finished restoring bundles to {}", dest_dir.display()));

    Ok(())
}
