//! Package.json update workflow
//!
//! This module provides:
//! - Workflow coordination: load → resolve → reconcile → write
//! - Writing only when reconciliation changed something
//! - Creation of the package.json for frontend resources extracted from jars
//! - Dry-run mode support

use crate::domain::{DependencyEntry, ManifestChange};
use crate::error::AppError;
use crate::manifest::{read_existing, Manifest, ManifestStore, PACKAGE_JSON};
use crate::reconcile::reconcile;
use crate::resolver::DependencyResolver;
use serde::Serialize;
use std::path::PathBuf;

/// Result of updating one package.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Top-level mutations applied
    pub changes: Vec<ManifestChange>,
    /// File content before the run, `None` if the file did not exist
    #[serde(skip)]
    pub previous_content: Option<String>,
    /// Rendered content when the manifest was (or in dry-run would be) written
    #[serde(skip)]
    pub content: Option<String>,
    /// Whether the file was actually written
    pub written: bool,
}

impl UpdateOutcome {
    fn unchanged(path: PathBuf, previous_content: Option<String>) -> Self {
        Self {
            path,
            changes: Vec::new(),
            previous_content,
            content: None,
            written: false,
        }
    }

    /// Number of entries added or changed
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if any dependency was added or changed
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Keeps the package.json files of an npm folder in sync with the framework
pub struct PackageUpdater {
    /// Folder containing the application package.json
    npm_folder: PathBuf,
    /// Folder where frontend files from jars are copied to
    resources_folder: Option<PathBuf>,
    resolver: DependencyResolver,
    store: ManifestStore,
}

impl PackageUpdater {
    /// Create an updater for `npm_folder`
    pub fn new(
        npm_folder: impl Into<PathBuf>,
        resolver: DependencyResolver,
        store: ManifestStore,
    ) -> Self {
        Self {
            npm_folder: npm_folder.into(),
            resources_folder: None,
            resolver,
            store,
        }
    }

    /// Also maintain the package.json of the flow resources folder
    pub fn with_resources_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.resources_folder = Some(folder.into());
        self
    }

    /// Path of the application package.json
    pub fn package_json_path(&self) -> PathBuf {
        self.npm_folder.join(PACKAGE_JSON)
    }

    /// Path of the flow resources package.json, if configured
    pub fn resources_package_json_path(&self) -> Option<PathBuf> {
        self.resources_folder
            .as_ref()
            .map(|folder| folder.join(PACKAGE_JSON))
    }

    /// Reconcile the application package.json with defaults plus scanned entries
    ///
    /// The file is written only when at least one top-level entry changed.
    /// On any error nothing is written.
    pub fn update_packages(
        &self,
        scanned: &[DependencyEntry],
        scanned_dev: &[DependencyEntry],
    ) -> Result<UpdateOutcome, AppError> {
        let path = self.package_json_path();
        tracing::debug!(path = %path.display(), "Updating package.json");

        let previous_content = read_existing(&path)?;
        let manifest = self.store.load(&path)?;
        let desired = self.resolver.resolve(scanned, scanned_dev)?;
        let result = reconcile(manifest, &desired)?;

        if !result.has_changes() {
            tracing::debug!(path = %path.display(), "package.json is up to date");
            return Ok(UpdateOutcome::unchanged(path, previous_content));
        }

        let content = self.store.save(&path, &result.manifest)?;
        Ok(UpdateOutcome {
            written: !self.store.is_dry_run(),
            path,
            changes: result.changes,
            previous_content,
            content: Some(content),
        })
    }

    /// Create the flow resources package.json if it does not exist
    ///
    /// Returns `None` when no resources folder is configured.
    pub fn update_resources_manifest(&self) -> Result<Option<UpdateOutcome>, AppError> {
        let Some(path) = self.resources_package_json_path() else {
            return Ok(None);
        };

        if let Some(existing) = read_existing(&path)? {
            return Ok(Some(UpdateOutcome::unchanged(path, Some(existing))));
        }

        let manifest = self
            .store
            .load_or_else(&path, Manifest::new_flow_resources)?;
        let content = self.store.save(&path, &manifest)?;

        Ok(Some(UpdateOutcome {
            written: !self.store.is_dry_run(),
            path,
            changes: Vec::new(),
            previous_content: None,
            content: Some(content),
        }))
    }
}
