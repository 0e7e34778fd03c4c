//! # gb - create and restore git bundles
//!
//! gb discovers git repositories under a source directory, writes one
//! `git bundle` per repository in parallel, and restores a directory of
//! bundles back into working repositories.
//!
//! ## Quick Start
//!
//! ```bash
//! # Bundle every repository under ~/git into the temp directory
//! gb
//!
//! # Custom locations and worker count
//! REPO_DIR=/srv/repos OUTPUT_DIR=/backups MAX_JOBS=4 gb backup -v
//!
//! # Restore, overwriting existing repositories without asking
//! gb restore /backups ~/restored --force
//! ```
//!
//! ## Library Usage
//!
//! The batch machinery works with any [`bundle::Archiver`]:
//!
//! ```rust,no_run
//! use gb::bundle::{Batch, GitArchiver, JobExecutor, Operation, discover_repositories};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let jobs = discover_repositories(Path::new("/srv/repos"), 2, Path::new("/backups"))?;
//! let executor = JobExecutor::new(Arc::new(GitArchiver::new()), Operation::Bundle);
//! let summary = Batch::new(executor, 4).run(jobs)?;
//!
//! for name in &summary.failed_names {
//!     println!("Failed to bundle '{name}'");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod bundle;
pub mod cli;
pub mod config;
pub mod parallel;

pub use cli::{Cli, Output};
pub use config::Config;

/// Result type alias for gb operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
