use std::fmt;
use std::path::PathBuf;

/// One unit of work: bundle one repository, or restore one bundle file.
///
/// A job is immutable once enqueued and is consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Repository or bundle name, used in progress and failure reports
    pub name: String,
    /// Repository directory (bundling) or bundle file (restoring)
    pub source: PathBuf,
    /// Bundle file (bundling) or repository directory (restoring)
    pub destination: PathBuf,
}

impl Job {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Outcome of a single job, keyed by the job's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResult {
    Success { name: String },
    Failure { name: String, reason: String },
}

impl JobResult {
    pub fn success(job: &Job) -> Self {
        JobResult::Success {
            name: job.name.clone(),
        }
    }

    pub fn failure(job: &Job, reason: impl Into<String>) -> Self {
        JobResult::Failure {
            name: job.name.clone(),
            reason: reason.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            JobResult::Success { name } | JobResult::Failure { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_carries_job_name() {
        let job = Job::new("alpha", "/src/alpha", "/out/alpha.bundle");

        let ok = JobResult::success(&job);
        assert!(ok.is_success());
        assert_eq!(ok.name(), "alpha");

        let failed = JobResult::failure(&job, "exit status 128");
        assert!(!failed.is_success());
        assert_eq!(failed.name(), "alpha");
        assert_eq!(job.to_string(), "alpha");
    }
}
