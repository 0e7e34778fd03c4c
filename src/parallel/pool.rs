use anyhow::Result;
use crossbeam::channel::{Receiver, bounded};
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::progress::ProgressTracker;
use crate::bundle::job::{Job, JobResult};

/// Upper bound on the auto-detected worker count
pub const MAX_AUTO_WORKERS: usize = 8;

/// Default worker count: available cores, capped at [`MAX_AUTO_WORKERS`]
pub fn default_workers() -> usize {
    std::cmp::min(num_cpus::get(), MAX_AUTO_WORKERS).max(1)
}

/// Clamp a configured worker count to at least one worker
pub fn clamp_workers(configured: i64) -> usize {
    if configured < 1 {
        1
    } else {
        usize::try_from(configured).unwrap_or(usize::MAX)
    }
}

/// Fixed-size pool of OS threads draining a pre-filled, closed job queue.
///
/// Every job is attempted exactly once. [`run`](Self::run) returns only after
/// every worker has exited.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'a, F> {
    worker_id: usize,
    job_rx: Receiver<Job>,
    tracker: &'a ProgressTracker,
    processor: &'a F,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `processor` over every job, recording each outcome in `tracker`.
    ///
    /// Returns the number of workers started. That is the configured count capped at
    /// the number of jobs, and zero for an empty batch.
    pub fn run<F>(&self, jobs: Vec<Job>, tracker: &ProgressTracker, processor: F) -> Result<usize>
    where
        F: Fn(&Job, usize) -> JobResult + Sync,
    {
        if jobs.is_empty() {
            return Ok(0);
        }

        // Workers beyond the job count would only see a closed, empty queue
        let started = self.workers.min(jobs.len());

        // The queue is filled and closed before any worker starts
        let (job_tx, job_rx) = bounded::<Job>(jobs.len());
        for job in jobs {
            job_tx.send(job)?;
        }
        drop(job_tx);

        crossbeam::thread::scope(|s| {
            for worker_id in 0..started {
                let ctx = WorkerContext {
                    worker_id,
                    job_rx: job_rx.clone(),
                    tracker,
                    processor: &processor,
                };
                s.spawn(move |_| worker_thread(ctx));
            }
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel execution"))?;

        Ok(started)
    }
}

fn worker_thread<F>(ctx: WorkerContext<'_, F>)
where
    F: Fn(&Job, usize) -> JobResult,
{
    while let Ok(job) = ctx.job_rx.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| (ctx.processor)(&job, ctx.worker_id)))
            .unwrap_or_else(|_| JobResult::failure(&job, "worker panicked while processing job"));

        tracing::trace!("worker-{} finished {}", ctx.worker_id, job.name);

        ctx.tracker.increment();
        if !result.is_success() {
            ctx.tracker.record_failure(result.name());
        }
    }
}
