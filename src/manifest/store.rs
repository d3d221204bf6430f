//! Loading and saving package.json files
//!
//! This module provides:
//! - Defaulting when the file does not exist yet
//! - Stable, 2-space indented output with a trailing newline
//! - Dry-run mode support (content is rendered but not written)

use super::{FrameworkRecord, Manifest};
use crate::error::ManifestError;
use std::fs;
use std::path::Path;

/// Reads and writes manifest files
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestStore {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ManifestStore {
    /// Create a new ManifestStore
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestStore in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this store is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Load an application manifest
    ///
    /// A missing file yields [`Manifest::new_application`]; a present file
    /// without a framework record gets an empty one attached.
    pub fn load(&self, path: &Path) -> Result<Manifest, ManifestError> {
        let mut manifest = self.load_or_else(path, Manifest::new_application)?;
        if manifest.framework.is_none() {
            manifest.framework = Some(FrameworkRecord::default());
        }
        Ok(manifest)
    }

    /// Load a manifest, falling back to `default` when the file is missing
    pub fn load_or_else(
        &self,
        path: &Path,
        default: impl FnOnce() -> Manifest,
    ) -> Result<Manifest, ManifestError> {
        match read_existing(path)? {
            Some(content) => parse(path, &content),
            None => {
                tracing::debug!(path = %path.display(), "No manifest found, using defaults");
                Ok(default())
            }
        }
    }

    /// Serialize a manifest the way it is written to disk
    pub fn render(&self, manifest: &Manifest) -> Result<String, ManifestError> {
        render(manifest)
    }

    /// Write a manifest, creating parent directories as needed
    ///
    /// Returns the content that was (or, in dry-run mode, would have been)
    /// written.
    pub fn save(&self, path: &Path, manifest: &Manifest) -> Result<String, ManifestError> {
        let content = render(manifest)?;

        if self.dry_run {
            tracing::info!("[dry-run] Would write file {}", path.display());
            return Ok(content);
        }

        tracing::info!("writing file {}", path.display());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ManifestError::write_error(parent, e))?;
        }
        fs::write(path, &content).map_err(|e| ManifestError::write_error(path, e))?;

        Ok(content)
    }
}

/// Read a file if it exists
pub fn read_existing(path: &Path) -> Result<Option<String>, ManifestError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ManifestError::read_error(path, e)),
    }
}

fn parse(path: &Path, content: &str) -> Result<Manifest, ManifestError> {
    serde_json::from_str(content).map_err(|e| ManifestError::malformed(path, e.to_string()))
}

fn render(manifest: &Manifest) -> Result<String, ManifestError> {
    let mut content =
        serde_json::to_string_pretty(manifest).map_err(|e| ManifestError::Serialize {
            message: e.to_string(),
        })?;
    content.push('\n');
    Ok(content)
}
