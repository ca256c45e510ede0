use clap::Parser;
use std::path::PathBuf;

/// CLI tool that lists dependency tarball URLs from npm and pnpm lockfiles
#[derive(Parser, Debug)]
#[command(name = "deps-scan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project directories to scan (defaults to the current directory)
    pub dirs: Vec<PathBuf>,

    /// Where to write the URL list
    #[arg(long, default_value = "deps-list.txt")]
    pub output: PathBuf,

    /// Emit a JSON summary instead of status lines
    #[arg(long)]
    pub json: bool,
}
