//! Git bundle jobs
//!
//! Discovery of repositories and bundle files, the archive capability that
//! turns one into the other, and the per-job executor run by the worker pool.

pub mod archiver;
pub mod batch;
pub mod discovery;
pub mod executor;
pub mod job;
pub mod report;
pub mod restore;

pub use archiver::{Archiver, GitArchiver};
pub use batch::Batch;
pub use discovery::{BUNDLE_EXTENSION, REPOSITORY_SEARCH_DEPTH, discover_bundles, discover_repositories};
pub use executor::{JobExecutor, Operation};
pub use job::{Job, JobResult};
pub use restore::{Confirmation, RestorePlan, confirm_overwrite};
