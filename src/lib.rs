//! flowdeps - package.json reconciliation for framework frontends
//!
//! This library keeps the npm manifest of a web application consistent
//! with the dependencies the framework and its add-ons require:
//! - Version parsing and comparison
//! - Reading and writing package.json with a framework-private record
//! - Merging default and scanned dependencies
//! - Reconciling the manifest with the desired entries
//! - Rewriting import paths of frontend files packaged in jars

pub mod cli;
pub mod domain;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod reconcile;
pub mod resolver;
pub mod updater;
