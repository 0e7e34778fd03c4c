//! Bounded parallel batch execution
//!
//! This module provides the worker pool and progress accounting shared by the
//! bundle and restore commands.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Worker Sizing**: Detects available CPU cores using `num_cpus::get()` and clamps configured counts
//! - **Execution**: Runs up to W OS threads (never more than there are jobs) over a pre-filled, closed crossbeam queue
//! - **Accounting**: Counts every finished job exactly once and records failed job names
//! - **Live Display**: Keeps an `indicatif` bar ticking on a terminal and prints one final plain progress line
//!
//! ## What This Module Does NOT Do:
//! - **Domain Logic**: Does not know what a job does; the caller supplies the processor
//! - **Retries**: A failed job is recorded, never re-queued
//! - **Timeouts**: A hung job holds its worker until it returns
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │  Discovery   │───▶│   WorkerPool     │───▶│ ProgressTracker  │
//! │  Vec<Job>    │    │  W threads       │    │ counts + names   │
//! └──────────────┘    └──────────────────┘    └────────┬─────────┘
//!                                                      │
//!                              ProgressTicker ◀────────┤
//!                              RunSummary     ◀────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use gb::bundle::{Job, JobResult};
//! use gb::parallel::{ProgressTracker, WorkerPool};
//!
//! let jobs = vec![Job::new("alpha", "/src/alpha", "/out/alpha.bundle")];
//! let tracker = ProgressTracker::new(jobs.len());
//!
//! WorkerPool::new(4).run(jobs, &tracker, |job, _worker_id| JobResult::success(job))?;
//! assert_eq!(tracker.summary().succeeded, 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod pool;
pub mod progress;

pub use pool::{WorkerPool, clamp_workers, default_workers};
pub use progress::{ProgressSnapshot, ProgressTicker, ProgressTracker, RunSummary};
