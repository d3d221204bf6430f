//! Change records produced by reconciliation

use super::DependencyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single mutation of a top-level dependency map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestChange {
    /// Map that was written
    pub kind: DependencyKind,
    /// Package name
    pub package: String,
    /// Version before the write, `None` when the package was added
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Version after the write
    pub version: String,
}

impl ManifestChange {
    /// Creates a change record
    pub fn new(
        kind: DependencyKind,
        package: impl Into<String>,
        previous: Option<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            package: package.into(),
            previous,
            version: version.into(),
        }
    }

    /// Returns true if the package was not present before
    pub fn is_addition(&self) -> bool {
        self.previous.is_none()
    }
}

impl fmt::Display for ManifestChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.previous {
            Some(previous) => write!(
                f,
                "{} {}: {} -> {}",
                self.kind, self.package, previous, self.version
            ),
            None => write!(f, "{} {}: + {}", self.kind, self.package, self.version),
        }
    }
}
