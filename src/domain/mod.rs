//! Core domain models for flowdeps
//!
//! This module contains the fundamental types used throughout the crate:
//! - Version parsing and comparison
//! - Dependency entries and the package.json maps they belong to
//! - Change records produced by reconciliation

mod change;
mod dependency;
pub mod version;

pub use change::ManifestChange;
pub use dependency::{DependencyEntry, DependencyKind};
pub use version::Version;
