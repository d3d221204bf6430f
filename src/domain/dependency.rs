//! Dependency information structures

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which dependency map of package.json an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// `dependencies`
    Dependencies,
    /// `devDependencies`
    DevDependencies,
}

impl DependencyKind {
    /// Returns both kinds in processing order
    pub fn all() -> &'static [DependencyKind] {
        &[DependencyKind::Dependencies, DependencyKind::DevDependencies]
    }

    /// The JSON key of this map in package.json
    pub fn key(&self) -> &'static str {
        match self {
            DependencyKind::Dependencies => "dependencies",
            DependencyKind::DevDependencies => "devDependencies",
        }
    }

    /// Returns true for `devDependencies`
    pub fn is_dev(&self) -> bool {
        matches!(self, DependencyKind::DevDependencies)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A desired (package, version) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyEntry {
    /// Package name (e.g. `@vaadin/router`)
    pub name: String,
    /// Version string (e.g. `^1.6.0`)
    pub version: String,
}

impl DependencyEntry {
    /// Creates a new entry
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse an npm style `name@version` string
    ///
    /// The separator is the last `@` that is not the first character, so
    /// scoped names such as `@scope/pkg@^1.0.0` work.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        let split = trimmed
            .rfind('@')
            .filter(|&index| index > 0)
            .ok_or_else(|| ConfigError::invalid_dependency(value, "expected name@version"))?;

        let (name, version) = (&trimmed[..split], &trimmed[split + 1..]);
        if version.is_empty() {
            return Err(ConfigError::invalid_dependency(value, "missing version"));
        }

        Ok(Self::new(name, version))
    }
}

impl FromStr for DependencyEntry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DependencyEntry::parse(s)
    }
}

impl fmt::Display for DependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
