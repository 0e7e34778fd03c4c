//! Overwrite policy for restoring into an existing destination

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::job::Job;

/// Restore jobs split by whether their destination already exists
#[derive(Debug, Default)]
pub struct RestorePlan {
    pub fresh: Vec<Job>,
    pub colliding: Vec<Job>,
}

impl RestorePlan {
    /// Partition jobs on whether `job.destination` is already present
    pub fn partition(jobs: Vec<Job>) -> Self {
        let (colliding, fresh) = jobs.into_iter().partition(|job| job.destination.exists());
        Self { fresh, colliding }
    }

    pub fn has_collisions(&self) -> bool {
        !self.colliding.is_empty()
    }

    pub fn colliding_names(&self) -> Vec<&str> {
        self.colliding.iter().map(|job| job.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fresh.len() + self.colliding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All jobs, colliding ones included
    pub fn into_jobs(self) -> Vec<Job> {
        let mut jobs = self.fresh;
        jobs.extend(self.colliding);
        jobs.sort_by(|a, b| a.name.cmp(&b.name));
        jobs
    }
}

/// Result of asking whether existing repositories may be overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Cancelled,
}

/// List the colliding repositories and ask for a yes/no answer.
///
/// Anything not starting with `y` or `Y`, including end of input, cancels.
pub fn confirm_overwrite<R, W>(names: &[&str], input: &mut R, out: &mut W) -> Result<Confirmation>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Warning: The following repositories already exist and will be overwritten:")?;
    for name in names {
        writeln!(out, "  - {name}")?;
    }
    writeln!(out)?;
    write!(out, "Continue and overwrite existing repositories? (y/N): ")?;
    out.flush()?;

    let mut response = String::new();
    input
        .read_line(&mut response)
        .context("Failed to read confirmation from stdin")?;

    if response.trim_start().to_lowercase().starts_with('y') {
        writeln!(out)?;
        Ok(Confirmation::Proceed)
    } else {
        Ok(Confirmation::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn plan_with_existing(temp: &TempDir, existing: &[&str], bundles: &[&str]) -> RestorePlan {
        let dest = temp.path().join("dest");
        fs::create_dir_all(&dest).unwrap();
        for name in existing {
            fs::create_dir_all(dest.join(name)).unwrap();
        }
        let jobs = bundles
            .iter()
            .map(|name| Job::new(*name, temp.path().join(format!("{name}.bundle")), dest.join(name)))
            .collect();
        RestorePlan::partition(jobs)
    }

    #[test]
    fn test_partition_lists_exactly_the_collisions() {
        let temp = TempDir::new().unwrap();
        let plan = plan_with_existing(&temp, &["A", "B"], &["A", "B", "C"]);

        assert!(plan.has_collisions());
        assert_eq!(plan.colliding_names(), vec!["A", "B"]);
        assert_eq!(plan.fresh.len(), 1);
        assert_eq!(plan.len(), 3);

        let all: Vec<String> = plan.into_jobs().into_iter().map(|j| j.name).collect();
        assert_eq!(all, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_collisions_in_empty_destination() {
        let temp = TempDir::new().unwrap();
        let plan = plan_with_existing(&temp, &[], &["x", "y"]);
        assert!(!plan.has_collisions());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_prompt_lists_names_and_accepts_yes() {
        let mut out = Vec::new();
        let answer = confirm_overwrite(&["A", "B"], &mut Cursor::new("Yes\n"), &mut out).unwrap();
        assert_eq!(answer, Confirmation::Proceed);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("  - A\n  - B\n"));
        assert!(text.contains("(y/N)"));
    }

    #[test]
    fn test_anything_else_cancels() {
        for reply in ["n\n", "\n", "", "no way\n", "sure\n"] {
            let mut out = Vec::new();
            let answer = confirm_overwrite(&["A"], &mut Cursor::new(reply), &mut out).unwrap();
            assert_eq!(answer, Confirmation::Cancelled, "reply {reply:?}");
        }
    }
}
