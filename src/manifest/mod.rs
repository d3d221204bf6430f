//! package.json document model and persistence
//!
//! This module provides:
//! - The typed manifest with its framework-private `vaadin` record
//! - Loading with defaults when the file is missing
//! - Saving with stable key order and 2-space indentation

mod document;
mod store;

pub use document::{DependencyMap, FrameworkRecord, Manifest};
pub use store::{read_existing, ManifestStore};

/// File name of the manifest inside an npm folder
pub const PACKAGE_JSON: &str = "package.json";
