use std::path::Path;
use std::sync::Arc;

use super::archiver::Archiver;
use super::job::{Job, JobResult};

/// Which direction a batch runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Repository directory -> bundle file
    Bundle,
    /// Bundle file -> repository directory
    Restore,
}

impl Operation {
    /// Label used on the live progress line
    pub fn progress_label(&self) -> &'static str {
        match self {
            Operation::Bundle => "Bundling repositories",
            Operation::Restore => "Restoring bundles",
        }
    }

    /// Verb used when listing failed items
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Bundle => "bundle",
            Operation::Restore => "restore",
        }
    }
}

/// Runs exactly one archive operation per job and classifies the outcome.
///
/// Errors from the archiver are always downgraded to [`JobResult::Failure`].
#[derive(Clone)]
pub struct JobExecutor {
    archiver: Arc<dyn Archiver>,
    operation: Operation,
}

impl JobExecutor {
    pub fn new(archiver: Arc<dyn Archiver>, operation: Operation) -> Self {
        Self { archiver, operation }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn execute(&self, job: &Job) -> JobResult {
        match self.operation {
            Operation::Bundle => self.bundle(job),
            Operation::Restore => self.restore(job),
        }
    }

    fn bundle(&self, job: &Job) -> JobResult {
        tracing::debug!("Processing repository: {}", job.name);

        match self.archiver.create(&job.source, &job.destination) {
            Ok(()) => JobResult::success(job),
            Err(e) => {
                tracing::debug!("Failed to bundle {}: {:#}", job.name, e);
                JobResult::failure(job, format!("{e:#}"))
            }
        }
    }

    fn restore(&self, job: &Job) -> JobResult {
        tracing::debug!("Restoring bundle: {}", job.name);

        if let Err(e) = remove_existing(&job.destination) {
            tracing::debug!(
                "Failed to remove existing directory {}: {}",
                job.destination.display(),
                e
            );
            return JobResult::failure(job, format!("failed to remove existing directory: {e}"));
        }

        match self.archiver.extract(&job.source, &job.destination) {
            Ok(()) => JobResult::success(job),
            Err(e) => {
                tracing::debug!(
                    "Failed to clone {} to {}: {:#}",
                    job.source.display(),
                    job.destination.display(),
                    e
                );
                JobResult::failure(job, format!("{e:#}"))
            }
        }
    }
}

/// Delete a destination tree left over from an earlier restore
fn remove_existing(path: &Path) -> std::io::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) => {
            tracing::debug!("Removing existing directory: {}", path.display());
            if meta.is_dir() {
                std::fs::remove_dir_all(path)
            } else {
                std::fs::remove_file(path)
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
