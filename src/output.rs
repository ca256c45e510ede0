//! Output formatting for JSON and text modes
//!
//! Provides the serializable scan summary for `--json` and the writer for the
//! final URL list file.

use crate::scan::{ProjectSummary, ScanReport};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Machine-readable scan summary
#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub projects: Vec<ProjectEntry>,
    /// Unique URLs written to the output file
    pub url_count: usize,
    pub output: String,
}

/// One scanned project in the JSON summary
#[derive(Debug, Serialize)]
pub struct ProjectEntry {
    pub name: String,
    pub path: String,
    pub dialect: String,
    pub url_count: usize,
}

impl ScanOutput {
    pub fn new(report: &ScanReport, output_path: &Path) -> Self {
        Self {
            projects: report.projects.iter().map(ProjectEntry::new).collect(),
            url_count: report.urls.len(),
            output: output_path.display().to_string(),
        }
    }
}

impl ProjectEntry {
    fn new(project: &ProjectSummary) -> Self {
        Self {
            name: project.name.clone(),
            path: project.dir.display().to_string(),
            dialect: project.dialect.to_string(),
            url_count: project.url_count,
        }
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Write the URL list, one URL per line, no trailing metadata.
pub fn write_list(path: &Path, urls: &[String]) -> io::Result<()> {
    fs::write(path, urls.join("\n"))
}
