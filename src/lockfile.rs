//! Lockfile detection and dependency URL extraction
//!
//! Supports two lockfile dialects:
//! - pnpm-lock.yaml (YAML): package keys are `name@version` identifiers, and
//!   tarball URLs are synthesized from the keys
//! - package-lock.json (JSON): package records carry an explicit `resolved` URL
//!
//! Detection priority: pnpm-lock.yaml > package-lock.json. The dialects never
//! coexist in practice, but pnpm wins if both files are present.

use crate::registry::{IdentifierError, PackageId};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockfileError {
    #[error("No pnpm-lock.yaml or package-lock.json found in {dir}")]
    NotFound { dir: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {details}")]
    Parse { path: PathBuf, details: String },

    #[error("Bad package key in {path}: {source}")]
    Identifier {
        path: PathBuf,
        source: IdentifierError,
    },
}

/// Supported lockfile dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Npm,
    Pnpm,
}

impl Dialect {
    /// On-disk filename the dialect is stored under
    pub fn filename(self) -> &'static str {
        match self {
            Dialect::Npm => "package-lock.json",
            Dialect::Pnpm => "pnpm-lock.yaml",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Npm => write!(f, "npm"),
            Dialect::Pnpm => write!(f, "pnpm"),
        }
    }
}

/// Detection priority order
const DIALECT_PRIORITY: [Dialect; 2] = [Dialect::Pnpm, Dialect::Npm];

/// Locate the lockfile in a project directory.
///
/// Probes for each dialect's filename in priority order; the first hit wins.
pub fn detect(dir: &Path) -> Result<(Dialect, PathBuf), LockfileError> {
    for dialect in DIALECT_PRIORITY {
        let path = dir.join(dialect.filename());
        if path.exists() {
            return Ok((dialect, path));
        }
    }

    Err(LockfileError::NotFound {
        dir: dir.to_path_buf(),
    })
}

/// Read a lockfile and extract its dependency archive URLs.
pub fn read_urls(path: &Path, dialect: Dialect) -> Result<Vec<String>, LockfileError> {
    let content = fs::read_to_string(path).map_err(|source| LockfileError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    extract_urls(&content, dialect, path)
}

/// Extract archive URLs from lockfile content.
///
/// npm: each package record's `resolved` URL, skipping records without one.
/// pnpm: one synthesized registry URL per package key.
///
/// URLs come out in the file's own mapping order. Duplicates are kept here;
/// deduplication happens when scans are aggregated.
pub fn extract_urls(
    content: &str,
    dialect: Dialect,
    path: &Path,
) -> Result<Vec<String>, LockfileError> {
    match dialect {
        Dialect::Npm => extract_npm_urls(content, path),
        Dialect::Pnpm => extract_pnpm_urls(content, path),
    }
}

// === package-lock.json ===

/// Structure for package-lock.json (lockfileVersion 2 and 3)
///
/// Keys are package paths like `node_modules/lodash`; only the record values
/// matter here. Mapping order is the file's order (serde_json preserve_order).
#[derive(Deserialize)]
struct NpmLockfile {
    #[serde(default)]
    packages: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct NpmPackageRecord {
    /// Resolved tarball URL; absent for the root project entry and local links
    resolved: Option<String>,
}

fn extract_npm_urls(content: &str, path: &Path) -> Result<Vec<String>, LockfileError> {
    let lockfile: NpmLockfile =
        serde_json::from_str(content).map_err(|e| LockfileError::Parse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let mut urls = Vec::new();
    for value in lockfile.packages.values() {
        let record: NpmPackageRecord =
            serde_json::from_value(value.clone()).map_err(|e| LockfileError::Parse {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        if let Some(resolved) = record.resolved
            && !resolved.is_empty()
        {
            urls.push(resolved);
        }
    }

    Ok(urls)
}

// === pnpm-lock.yaml ===

/// Structure for pnpm-lock.yaml (lockfileVersion 9.0)
///
/// Package keys are `name@version` or `@scope/name@version` identifiers; the
/// metadata values carry no URL and are ignored.
#[derive(Deserialize)]
struct PnpmLockfile {
    packages: Option<serde_yml::Mapping>,
}

fn extract_pnpm_urls(content: &str, path: &Path) -> Result<Vec<String>, LockfileError> {
    let lockfile: PnpmLockfile =
        serde_yml::from_str(content).map_err(|e| LockfileError::Parse {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

    let packages = lockfile.packages.unwrap_or_default();
    let mut urls = Vec::with_capacity(packages.len());
    for key in packages.keys() {
        let key = key.as_str().ok_or_else(|| LockfileError::Parse {
            path: path.to_path_buf(),
            details: "non-string package key".to_string(),
        })?;

        let id = PackageId::parse(key).map_err(|source| LockfileError::Identifier {
            path: path.to_path_buf(),
            source,
        })?;
        urls.push(id.tarball_url());
    }

    Ok(urls)
}
