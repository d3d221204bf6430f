//! flowdeps - package.json reconciliation CLI tool
//!
//! Adds the npm dependencies a framework frontend needs to package.json,
//! upgrading entries the framework manages and leaving user pins alone.

use clap::Parser;
use flowdeps::cli::CliArgs;
use flowdeps::error::IoError;
use flowdeps::logging;
use flowdeps::manifest::ManifestStore;
use flowdeps::output::{create_formatter, OutputConfig};
use flowdeps::resolver::DependencyResolver;
use flowdeps::updater::PackageUpdater;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose, args.quiet) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Print version info in verbose mode
    if args.verbose {
        eprintln!("flowdeps v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
        if args.has_scanned_dependencies() {
            eprintln!(
                "Scanned: {} dependencies, {} dev dependencies",
                args.add.len(),
                args.add_dev.len()
            );
        }
    }

    if !args.path.is_dir() {
        return Err(IoError::directory_not_found(&args.path).into());
    }

    let resolver = match &args.defaults {
        Some(path) => DependencyResolver::from_path(path)?,
        None => DependencyResolver::builtin(),
    };

    let mut updater = PackageUpdater::new(&args.path, resolver, ManifestStore::new(args.dry_run));
    if let Some(resources) = &args.resources {
        updater = updater.with_resources_folder(resources);
    }

    let mut outcomes = vec![updater.update_packages(&args.add, &args.add_dev)?];
    if let Some(outcome) = updater.update_resources_manifest()? {
        outcomes.push(outcome);
    }

    // Create output formatter based on CLI options
    let mut output_config =
        OutputConfig::from_cli(args.json, args.diff, args.verbose, args.quiet, args.dry_run);
    output_config.color = io::stdout().is_terminal();
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&outcomes, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
