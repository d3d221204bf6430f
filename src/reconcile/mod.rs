//! Dependency reconciliation
//!
//! Merges desired entries into a manifest. The framework record (`vaadin`)
//! remembers the version the framework asked for last time, which lets the
//! engine tell a version the user pinned apart from one the framework wrote:
//!
//! - First time a package is seen: record it, and write the top-level entry
//!   unless the user already has a newer version there.
//! - Package seen before: if the user kept the framework's version, follow
//!   the framework (up or down). Otherwise only move to a strictly newer
//!   version. The record always moves to the desired version.
//!
//! Only writes to the top-level maps count as changes.

use crate::domain::{DependencyEntry, DependencyKind, ManifestChange, Version};
use crate::error::VersionError;
use crate::manifest::{DependencyMap, Manifest};
use crate::resolver::DesiredDependencies;

/// Outcome of a reconciliation run
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationResult {
    /// The manifest after all entries were applied
    pub manifest: Manifest,
    /// Top-level mutations, in processing order
    pub changes: Vec<ManifestChange>,
}

impl ReconciliationResult {
    /// Number of entries added or changed
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if the manifest needs to be persisted
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Apply every desired entry to the manifest
///
/// `dependencies` are processed before `devDependencies`, each in package
/// name order. The manifest is taken by value: on error the partially
/// updated copy is dropped and nothing reaches the caller.
pub fn reconcile(
    mut manifest: Manifest,
    desired: &DesiredDependencies,
) -> Result<ReconciliationResult, VersionError> {
    let mut changes = Vec::new();

    for &kind in DependencyKind::all() {
        for (name, version) in desired.section(kind) {
            let entry = DependencyEntry::new(name, version);
            if let Some(change) = add_dependency(&mut manifest, kind, &entry)? {
                changes.push(change);
            }
        }
    }

    if !changes.is_empty() {
        tracing::info!("Added {} dependencies to main package.json", changes.len());
    }

    Ok(ReconciliationResult { manifest, changes })
}

/// Apply one desired entry to the `kind` maps of the manifest
///
/// Returns the top-level change, if any.
pub fn add_dependency(
    manifest: &mut Manifest,
    kind: DependencyKind,
    entry: &DependencyEntry,
) -> Result<Option<ManifestChange>, VersionError> {
    let section = kind.key();
    let package = entry.name.as_str();
    let parse = |version: &str| {
        Version::parse(version).map_err(|e| e.in_entry(package, section))
    };

    let new_version = parse(&entry.version)?;
    let (top_level, framework) = manifest.sections_mut(kind);

    let write = match framework.get(package) {
        None => match top_level.get(package) {
            None => true,
            Some(current) => new_version.is_newer_than(&parse(current)?),
        },
        Some(recorded) => match top_level.get(package) {
            None => true,
            Some(current) => {
                let package_version = parse(current)?;
                let framework_version = parse(recorded)?;
                if framework_version.is_equal_to(&package_version)
                    && !framework_version.is_equal_to(&new_version)
                {
                    true
                } else {
                    new_version.is_newer_than(&package_version)
                }
            }
        },
    };

    framework.insert(package.to_string(), entry.version.clone());

    if !write {
        return Ok(None);
    }

    let change = set_version(top_level, package, &entry.version).map(|previous| {
        tracing::debug!("Added \"{}\": \"{}\" line.", package, entry.version);
        ManifestChange::new(kind, package, previous, &entry.version)
    });
    Ok(change)
}

/// Writes `version` unless it is already the exact value
///
/// Returns `Some(previous)` when the map was mutated.
fn set_version(map: &mut DependencyMap, package: &str, version: &str) -> Option<Option<String>> {
    if map.get(package).map(String::as_str) == Some(version) {
        return None;
    }
    Some(map.insert(package.to_string(), version.to_string()))
}
