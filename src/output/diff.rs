//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff style display per manifest
//! - Before/after version lines per changed package

use crate::output::{total_changes, OutputFormatter};
use crate::updater::UpdateOutcome;
use std::io::Write;

/// Diff formatter for showing version changes
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, outcomes: &[UpdateOutcome], writer: &mut dyn Write) -> std::io::Result<()> {
        for outcome in outcomes {
            self.format_outcome(outcome, writer)?;
        }

        writeln!(
            writer,
            "{}# {} dependency line(s) changed",
            self.dry_run_prefix(),
            total_changes(outcomes)
        )
    }

    fn format_outcome(
        &self,
        outcome: &UpdateOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if !outcome.has_changes() {
            return Ok(());
        }

        let prefix = self.dry_run_prefix();
        writeln!(writer, "{}--- a/{}", prefix, outcome.path.display())?;
        writeln!(writer, "{}+++ b/{}", prefix, outcome.path.display())?;

        for change in &outcome.changes {
            writeln!(writer, "@@ {} {} @@", change.kind.key(), change.package)?;
            if let Some(previous) = &change.previous {
                writeln!(writer, "-  \"{}\": \"{}\"", change.package, previous)?;
            }
            writeln!(writer, "+  \"{}\": \"{}\"", change.package, change.version)?;
        }

        writeln!(writer)
    }
}
