//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of update outcomes
//! - Per-file change lists for build trigger logic

use crate::domain::ManifestChange;
use crate::output::{total_changes, OutputFormatter};
use crate::updater::UpdateOutcome;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Whether any manifest changed
    changed: bool,
    /// Total number of added or changed entries
    changes: usize,
    /// Per-manifest results
    manifests: Vec<JsonManifest<'a>>,
}

/// JSON representation of a manifest outcome
#[derive(Serialize)]
struct JsonManifest<'a> {
    /// Path to the manifest file
    path: String,
    /// Whether the file was written
    written: bool,
    /// List of changes
    changes: Vec<JsonChange<'a>>,
}

/// JSON representation of a change
#[derive(Serialize)]
struct JsonChange<'a> {
    /// Package name
    name: &'a str,
    /// dependencies or devDependencies
    section: &'static str,
    /// Old version, absent for additions
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    /// New version
    to: &'a str,
}

impl<'a> From<&'a ManifestChange> for JsonChange<'a> {
    fn from(change: &'a ManifestChange) -> Self {
        Self {
            name: &change.package,
            section: change.kind.key(),
            from: change.previous.as_deref(),
            to: &change.version,
        }
    }
}

impl<'a> From<&'a UpdateOutcome> for JsonManifest<'a> {
    fn from(outcome: &'a UpdateOutcome) -> Self {
        Self {
            path: outcome.path.display().to_string(),
            written: outcome.written,
            changes: outcome.changes.iter().map(JsonChange::from).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcomes: &[UpdateOutcome], writer: &mut dyn Write) -> std::io::Result<()> {
        let total = total_changes(outcomes);
        let output = JsonOutput {
            dry_run: self.dry_run,
            changed: total > 0,
            changes: total,
            manifests: outcomes.iter().map(JsonManifest::from).collect(),
        };

        let json = serde_json::to_string_pretty(&output)?;
        writeln!(writer, "{}", json)
    }

    fn format_outcome(
        &self,
        outcome: &UpdateOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&JsonManifest::from(outcome))?;
        writeln!(writer, "{}", json)
    }
}
