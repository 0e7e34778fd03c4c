use anyhow::Result;
use indicatif::ProgressDrawTarget;
use std::io::Write;
use std::sync::{Arc, Mutex};

use super::executor::JobExecutor;
use super::job::Job;
use crate::parallel::{ProgressTicker, ProgressTracker, RunSummary, WorkerPool};

/// One bundle or restore run: executor + pool + live progress line
#[derive(Clone)]
pub struct Batch {
    executor: JobExecutor,
    pool: WorkerPool,
}

impl Batch {
    pub fn new(executor: JobExecutor, workers: usize) -> Self {
        Self {
            executor,
            pool: WorkerPool::new(workers),
        }
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Run every job, drawing progress on stdout
    pub fn run(&self, jobs: Vec<Job>) -> Result<RunSummary> {
        self.run_with_progress(
            jobs,
            ProgressDrawTarget::stdout(),
            Arc::new(Mutex::new(std::io::stdout())),
        )
    }

    /// Run every job with the live bar on `target` and the final progress line on `out`.
    ///
    /// An empty batch returns immediately without starting workers or the ticker.
    pub fn run_with_progress(
        &self,
        jobs: Vec<Job>,
        target: ProgressDrawTarget,
        out: Arc<Mutex<dyn Write + Send>>,
    ) -> Result<RunSummary> {
        if jobs.is_empty() {
            return Ok(RunSummary::empty());
        }

        let tracker = Arc::new(ProgressTracker::new(jobs.len()));
        tracing::debug!("Using {} parallel jobs for {} items", self.pool.workers(), jobs.len());

        let ticker = ProgressTicker::start_with(
            self.executor.operation().progress_label(),
            tracker.clone(),
            target,
            out,
        )?;

        let executor = &self.executor;
        let outcome = self
            .pool
            .run(jobs, &tracker, |job, _worker_id| executor.execute(job));

        // Stop the ticker before reading final state, even if the pool failed
        ticker.stop();
        outcome?;

        Ok(tracker.summary())
    }
}
