//! CLI argument parsing module for flowdeps

use crate::domain::DependencyEntry;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a dependency given as `name@version`
fn parse_dependency(s: &str) -> Result<DependencyEntry, String> {
    DependencyEntry::parse(s).map_err(|e| e.to_string())
}

/// Keeps a frontend package.json in sync with the framework's npm dependencies
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flowdeps",
    version,
    about = "Keeps package.json in sync with the framework's npm dependencies"
)]
pub struct CliArgs {
    /// Folder containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Dry run mode - show what would be changed without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    // Dependency sources
    /// TOML file with the default dependency tables (replaces the built-in ones)
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Add a dependency found by a scanner, e.g. `@vaadin/vaadin-button@1.2.0`
    /// (can be specified multiple times)
    #[arg(long, value_name = "NAME@VERSION", value_parser = parse_dependency, action = ArgAction::Append)]
    pub add: Vec<DependencyEntry>,

    /// Add a dev dependency found by a scanner (can be specified multiple times)
    #[arg(long, value_name = "NAME@VERSION", value_parser = parse_dependency, action = ArgAction::Append)]
    pub add_dev: Vec<DependencyEntry>,

    /// Folder receiving frontend files extracted from jars; its package.json
    /// is created when missing
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Show changes in diff format
    #[arg(long)]
    pub diff: bool,
}

impl CliArgs {
    /// Check if any dependency was given on the command line
    pub fn has_scanned_dependencies(&self) -> bool {
        !self.add.is_empty() || !self.add_dev.is_empty()
    }
}
