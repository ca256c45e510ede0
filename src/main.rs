mod cli;
mod lockfile;
mod output;
mod registry;
mod scan;

use clap::Parser;
use cli::Cli;
use scan::ScanConfig;

fn main() {
    let cli = Cli::parse();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: failed to resolve current directory: {}", e);
            std::process::exit(1);
        }
    };

    // The output file always lands relative to the working directory, not the
    // scanned directories.
    let config = ScanConfig {
        target_dirs: cli.dirs,
        output_path: working_dir.join(&cli.output),
        working_dir,
    };

    let report = match scan::scan(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.json {
        for project in &report.projects {
            println!(
                "Project: {} ({}) [{} lockfile, {} packages]",
                project.name,
                project.dir.display(),
                project.dialect,
                project.url_count
            );
        }
    }

    // The whole list is computed before anything touches disk; a failed write
    // leaves no partial output.
    if let Err(e) = output::write_list(&config.output_path, &report.urls) {
        eprintln!(
            "Error: failed to write {}: {}",
            config.output_path.display(),
            e
        );
        std::process::exit(1);
    }

    if cli.json {
        output::print_json(&output::ScanOutput::new(&report, &config.output_path));
    } else {
        println!(
            "Saved {} dependency URLs to {}",
            report.urls.len(),
            config.output_path.display()
        );
    }
}
