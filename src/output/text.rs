//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Added and changed dependency lines with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Production vs development dependency marking
//! - Summary line

use crate::domain::{ManifestChange, Version};
use crate::output::{total_changes, OutputFormatter, Verbosity};
use crate::updater::UpdateOutcome;
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch or qualifier change
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        match (Version::parse(old), Version::parse(new)) {
            (Ok(old), Ok(new)) => {
                if new.major != old.major {
                    VersionChangeType::Major
                } else if new.minor != old.minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Format a single change line
    fn format_change_line(
        &self,
        change: &ManifestChange,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let dev_marker = if change.kind.is_dev() { " (dev)" } else { "" };

        match &change.previous {
            None => {
                if self.color {
                    writeln!(
                        writer,
                        "  {} {:width$} {}{}",
                        "+".green(),
                        change.package,
                        change.version.bright_white().bold(),
                        dev_marker.dimmed(),
                        width = max_name_len
                    )
                } else {
                    writeln!(
                        writer,
                        "  + {:width$} {}{}",
                        change.package,
                        change.version,
                        dev_marker,
                        width = max_name_len
                    )
                }
            }
            Some(previous) => {
                let change_type = VersionChangeType::from_versions(previous, &change.version);
                if self.color {
                    writeln!(
                        writer,
                        "  {} {:width$} {} {} {} [{}]{}",
                        "~".yellow(),
                        change.package,
                        previous.dimmed(),
                        "→".dimmed(),
                        change.version.bright_white().bold(),
                        change_type.colored_label(),
                        dev_marker.dimmed(),
                        width = max_name_len
                    )
                } else {
                    writeln!(
                        writer,
                        "  ~ {:width$} {} -> {} [{}]{}",
                        change.package,
                        previous,
                        change.version,
                        change_type.label(),
                        dev_marker,
                        width = max_name_len
                    )
                }
            }
        }
    }

    /// Format the summary line
    fn format_summary(
        &self,
        outcomes: &[UpdateOutcome],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let total = total_changes(outcomes);

        if total == 0 {
            return writeln!(writer, "{}All dependencies are up to date", prefix);
        }

        let noun = if total == 1 { "dependency" } else { "dependencies" };
        if self.color {
            writeln!(
                writer,
                "{}{} {} added or changed",
                prefix,
                total.to_string().green().bold(),
                noun
            )
        } else {
            writeln!(writer, "{}{} {} added or changed", prefix, total, noun)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcomes: &[UpdateOutcome], writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity != Verbosity::Quiet {
            for outcome in outcomes {
                self.format_outcome(outcome, writer)?;
            }
        }
        self.format_summary(outcomes, writer)
    }

    fn format_outcome(
        &self,
        outcome: &UpdateOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let verbose = self.verbosity == Verbosity::Verbose;
        if !outcome.has_changes() && !(verbose || outcome.written) {
            return Ok(());
        }

        let prefix = self.dry_run_prefix();
        let path_display = outcome.path.display().to_string();
        let status = if outcome.written {
            "written"
        } else if outcome.has_changes() {
            "not written"
        } else {
            "unchanged"
        };

        if self.color {
            writeln!(
                writer,
                "{}{} {}",
                prefix,
                path_display.bold(),
                format!("({})", status).dimmed()
            )?;
        } else {
            writeln!(writer, "{}{} ({})", prefix, path_display, status)?;
        }

        let max_name_len = outcome
            .changes
            .iter()
            .map(|c| c.package.len())
            .max()
            .unwrap_or(0)
            .max(20);

        for change in &outcome.changes {
            self.format_change_line(change, max_name_len, writer)?;
        }

        Ok(())
    }
}
