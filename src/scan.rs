//! Project scanning
//!
//! Composes lockfile detection and URL extraction across one or more project
//! directories, then deduplicates the combined URL list. All process state
//! (working directory, targets, output path) is passed in via `ScanConfig` so
//! the scanner itself never reads globals.

use crate::lockfile::{self, Dialect, LockfileError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {details}")]
    ManifestParse { path: PathBuf, details: String },

    #[error(transparent)]
    Lockfile(#[from] LockfileError),
}

/// Scan parameters
#[derive(Debug)]
pub struct ScanConfig {
    /// Project directories to scan; empty means the working directory itself
    pub target_dirs: Vec<PathBuf>,
    /// Base for resolving relative target paths
    pub working_dir: PathBuf,
    /// Where the URL list is written
    pub output_path: PathBuf,
}

/// One scanned project, reported for status output
#[derive(Debug)]
pub struct ProjectSummary {
    pub name: String,
    pub dir: PathBuf,
    pub dialect: Dialect,
    /// URLs found in this project's lockfile, before deduplication
    pub url_count: usize,
}

/// Result of scanning all target directories
#[derive(Debug)]
pub struct ScanReport {
    pub projects: Vec<ProjectSummary>,
    /// Combined URL list, deduplicated in first-seen order
    pub urls: Vec<String>,
}

/// package.json, read only for its display name
#[derive(Deserialize)]
struct Manifest {
    name: Option<String>,
}

/// Scan every target directory and aggregate the dependency URLs.
///
/// Any failure (missing package.json, missing lockfile, malformed content)
/// aborts the whole scan; there is no per-directory skip-and-continue.
pub fn scan(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    let dirs: Vec<PathBuf> = if config.target_dirs.is_empty() {
        vec![config.working_dir.clone()]
    } else {
        config
            .target_dirs
            .iter()
            .map(|dir| config.working_dir.join(dir))
            .collect()
    };

    let mut projects = Vec::with_capacity(dirs.len());
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for dir in dirs {
        let name = project_name(&dir)?;
        let (dialect, lockfile_path) = lockfile::detect(&dir)?;
        let found = lockfile::read_urls(&lockfile_path, dialect)?;

        projects.push(ProjectSummary {
            name,
            dir,
            dialect,
            url_count: found.len(),
        });

        // First-seen order across directories, so output is deterministic
        for url in found {
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }
    }

    Ok(ScanReport { projects, urls })
}

/// Display name from the project's package.json.
///
/// A missing `name` field falls back to the directory path; a missing or
/// malformed file is fatal for the run.
fn project_name(dir: &Path) -> Result<String, ScanError> {
    let path = dir.join("package.json");
    let content = fs::read_to_string(&path).map_err(|source| ScanError::Manifest {
        path: path.clone(),
        source,
    })?;

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| ScanError::ManifestParse {
            path,
            details: e.to_string(),
        })?;

    Ok(manifest.name.unwrap_or_else(|| dir.display().to_string()))
}
