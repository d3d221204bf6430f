//! Desired dependency resolution
//!
//! Combines the framework's default dependency tables with entries supplied
//! by an external dependency scanner. The default tables are configuration
//! data (`defaults.toml`), embedded at build time and parsed once.

use crate::domain::{DependencyEntry, DependencyKind};
use crate::error::ConfigError;
use crate::manifest::DependencyMap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Layout version of default dependency tables understood by this build
pub const DEFAULTS_FORMAT_VERSION: u32 = 1;

const BUILTIN_DEFAULTS: &str = include_str!("defaults.toml");

static BUILTIN: LazyLock<DefaultDependencies> = LazyLock::new(|| {
    DefaultDependencies::parse(BUILTIN_DEFAULTS, Path::new("defaults.toml")).unwrap()
});

/// Default dependency tables
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultDependencies {
    pub format_version: u32,
    #[serde(default)]
    pub dependencies: DependencyMap,
    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: DependencyMap,
}

impl DefaultDependencies {
    /// Parse a TOML table, `origin` is only used in error messages
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let defaults: DefaultDependencies =
            toml::from_str(content).map_err(|e| ConfigError::InvalidDefaults {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        if defaults.format_version != DEFAULTS_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedDefaultsVersion {
                found: defaults.format_version,
                expected: DEFAULTS_FORMAT_VERSION,
            });
        }

        Ok(defaults)
    }
}

/// The entries a reconciliation run should apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesiredDependencies {
    pub dependencies: DependencyMap,
    pub dev_dependencies: DependencyMap,
}

impl DesiredDependencies {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an entry
    pub fn insert(&mut self, kind: DependencyKind, entry: DependencyEntry) {
        self.section_mut(kind).insert(entry.name, entry.version);
    }

    /// Builder style [`insert`](Self::insert)
    pub fn with(mut self, kind: DependencyKind, name: &str, version: &str) -> Self {
        self.insert(kind, DependencyEntry::new(name, version));
        self
    }

    /// Returns the map for the given kind
    pub fn section(&self, kind: DependencyKind) -> &DependencyMap {
        match kind {
            DependencyKind::Dependencies => &self.dependencies,
            DependencyKind::DevDependencies => &self.dev_dependencies,
        }
    }

    fn section_mut(&mut self, kind: DependencyKind) -> &mut DependencyMap {
        match kind {
            DependencyKind::Dependencies => &mut self.dependencies,
            DependencyKind::DevDependencies => &mut self.dev_dependencies,
        }
    }

    /// Total number of entries in both maps
    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Returns true if both maps are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Produces the desired dependency set for a build
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    defaults: DefaultDependencies,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DependencyResolver {
    /// Resolver using the tables shipped with this crate
    pub fn builtin() -> Self {
        Self {
            defaults: BUILTIN.clone(),
        }
    }

    /// Resolver using the given tables
    pub fn with_defaults(defaults: DefaultDependencies) -> Self {
        Self { defaults }
    }

    /// Resolver using tables read from a TOML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidPath {
            path: PathBuf::from(path),
            message: e.to_string(),
        })?;
        Ok(Self::with_defaults(DefaultDependencies::parse(
            &content, path,
        )?))
    }

    /// Runtime dependencies the framework always requires
    pub fn default_dependencies(&self) -> BTreeSet<DependencyEntry> {
        to_entries(&self.defaults.dependencies)
    }

    /// Build tool dependencies the framework always requires
    pub fn default_dev_dependencies(&self) -> BTreeSet<DependencyEntry> {
        to_entries(&self.defaults.dev_dependencies)
    }

    /// Merge scanned entries over the defaults
    ///
    /// A scanned entry for a package that is also a default replaces the
    /// default version.
    pub fn resolve(
        &self,
        scanned: &[DependencyEntry],
        scanned_dev: &[DependencyEntry],
    ) -> Result<DesiredDependencies, ConfigError> {
        let mut desired = DesiredDependencies {
            dependencies: self.defaults.dependencies.clone(),
            dev_dependencies: self.defaults.dev_dependencies.clone(),
        };

        for (kind, entries) in [
            (DependencyKind::Dependencies, scanned),
            (DependencyKind::DevDependencies, scanned_dev),
        ] {
            for entry in entries {
                if entry.name.trim().is_empty() {
                    return Err(ConfigError::invalid_dependency(
                        entry.to_string(),
                        "empty package name",
                    ));
                }
                desired.insert(kind, entry.clone());
            }
        }

        tracing::debug!(
            dependencies = desired.dependencies.len(),
            dev_dependencies = desired.dev_dependencies.len(),
            "Resolved desired dependencies"
        );

        Ok(desired)
    }
}

fn to_entries(map: &DependencyMap) -> BTreeSet<DependencyEntry> {
    map.iter()
        .map(|(name, version)| DependencyEntry::new(name, version))
        .collect()
}
