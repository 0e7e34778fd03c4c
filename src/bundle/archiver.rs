//! Archive create/extract capability
//!
//! The executor only sees the [`Archiver`] trait. [`GitArchiver`] shells out to
//! the system `git` binary; tests substitute an in-memory fake.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Command;

/// Creates a bundle from a repository and restores a repository from a bundle
pub trait Archiver: Send + Sync {
    /// Write a bundle of every ref in `repo` to `bundle`
    fn create(&self, repo: &Path, bundle: &Path) -> Result<()>;

    /// Clone `bundle` into the (not yet existing) directory `dest`
    fn extract(&self, bundle: &Path, dest: &Path) -> Result<()>;
}

/// Archiver backed by `git bundle create` and `git clone`
#[derive(Debug, Clone)]
pub struct GitArchiver {
    program: String,
}

impl Default for GitArchiver {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl GitArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail early when the git binary cannot be found on PATH
    pub fn ensure_available(&self) -> Result<()> {
        which::which(&self.program)
            .map(|_| ())
            .with_context(|| format!("'{}' was not found on PATH", self.program))
    }

    fn run(&self, mut command: Command, action: &str) -> Result<()> {
        tracing::trace!("Running {:?}", command);

        let output = command
            .output()
            .with_context(|| format!("Failed to launch {} for {action}", self.program))?;

        if !output.stderr.is_empty() {
            tracing::trace!("{} stderr: {}", action, String::from_utf8_lossy(&output.stderr).trim());
        }

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{action} failed ({}): {}", output.status, error_msg.trim()));
        }

        Ok(())
    }
}

impl Archiver for GitArchiver {
    fn create(&self, repo: &Path, bundle: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command
            .arg("-C")
            .arg(repo)
            .args(["bundle", "create"])
            .arg(bundle)
            .arg("--all");
        self.run(command, "git bundle create")
    }

    fn extract(&self, bundle: &Path, dest: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(["clone", "--quiet"]).arg(bundle).arg(dest);
        self.run(command, "git clone")
    }
}
