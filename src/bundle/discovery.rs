//! Work item discovery
//!
//! Finds the repositories to bundle under a source tree and the bundle files
//! to restore from a directory.

use anyhow::{Context, Result, bail};
use globset::Glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::job::Job;

/// How deep below the source root repositories are searched for
pub const REPOSITORY_SEARCH_DEPTH: usize = 2;

/// File suffix used for bundles, both when writing and when restoring
pub const BUNDLE_EXTENSION: &str = "bundle";

const GIT_DIR_SUFFIX: &str = ".git";

/// Discover git repositories under `root` and map each one to a bundle job
/// writing `<output_dir>/<name>.bundle`.
///
/// A directory named `.git` stands for the working repository containing it;
/// any other directory ending in `.git` is a bare repository. Nothing found is
/// an empty list, not an error.
pub fn discover_repositories(root: &Path, max_depth: usize, output_dir: &Path) -> Result<Vec<Job>> {
    std::fs::read_dir(root)
        .with_context(|| format!("Failed to read repository directory: {}", root.display()))?;

    let mut repo_dirs: Vec<PathBuf> = Vec::new();
    let mut walker = WalkDir::new(root).max_depth(max_depth).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to traverse {}", root.display()));
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(GIT_DIR_SUFFIX) {
            continue;
        }

        let repo_dir = if file_name == GIT_DIR_SUFFIX {
            match entry.path().parent() {
                Some(parent) => parent.to_path_buf(),
                None => continue,
            }
        } else {
            entry.path().to_path_buf()
        };

        repo_dirs.push(repo_dir);

        if entry.depth() > 0 {
            walker.skip_current_dir();
        }
    }

    repo_dirs.sort();
    repo_dirs.dedup();

    let jobs = repo_dirs
        .into_iter()
        .map(|repo_dir| {
            let name = repository_name(&repo_dir);
            let bundle_path = output_dir.join(format!("{name}.{BUNDLE_EXTENSION}"));
            Job::new(name, repo_dir, bundle_path)
        })
        .collect::<Vec<_>>();

    tracing::debug!("Found {} repositories", jobs.len());
    Ok(jobs)
}

/// Name a repository after its directory, dropping a bare repository's `.git` suffix
pub fn repository_name(repo_dir: &Path) -> String {
    let base = repo_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| repo_dir.to_string_lossy().into_owned());

    match base.strip_suffix(GIT_DIR_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => base,
    }
}

/// Discover `*.bundle` files directly inside `bundle_dir` and map each one to a
/// restore job cloning into `<dest_dir>/<name>`.
pub fn discover_bundles(bundle_dir: &Path, dest_dir: &Path) -> Result<Vec<Job>> {
    if !bundle_dir.is_dir() {
        bail!("bundle directory '{}' does not exist", bundle_dir.display());
    }

    let matcher = Glob::new(&format!("*.{BUNDLE_EXTENSION}"))?.compile_matcher();

    let mut bundle_files = Vec::new();
    for entry in WalkDir::new(bundle_dir).min_depth(1).max_depth(1) {
        let entry = entry
            .with_context(|| format!("Failed to read bundle directory: {}", bundle_dir.display()))?;

        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            bundle_files.push(entry.into_path());
        }
    }
    bundle_files.sort();

    let jobs = bundle_files
        .into_iter()
        .filter_map(|bundle_file| {
            let name = bundle_file.file_stem()?.to_string_lossy().into_owned();
            let destination = dest_dir.join(&name);
            Some(Job::new(name, bundle_file, destination))
        })
        .collect::<Vec<_>>();

    tracing::debug!("Found {} bundle files", jobs.len());
    Ok(jobs)
}
