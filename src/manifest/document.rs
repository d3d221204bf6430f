//! Typed package.json document
//!
//! Known keys are modelled as fields; everything else (scripts, repository,
//! ...) is kept in `extra` so it survives a load/save cycle.

use crate::domain::DependencyKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub(crate) const DEFAULT_NAME: &str = "no-name";
pub(crate) const DEFAULT_LICENSE: &str = "UNLICENSED";
pub(crate) const FLOW_RESOURCES_NAME: &str = "@vaadin/flow-frontend";
pub(crate) const FLOW_RESOURCES_MAIN: &str = "Flow";
pub(crate) const FLOW_RESOURCES_VERSION: &str = "1.0.0";

/// Package name to version string
pub type DependencyMap = BTreeMap<String, String>;

/// A package.json manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: DependencyMap,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,
    /// Versions the framework itself last requested
    #[serde(default, rename = "vaadin", skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The framework-private `vaadin` sub-document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkRecord {
    #[serde(default)]
    pub dependencies: DependencyMap,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,
    /// Reserved for change fingerprinting, empty on creation
    #[serde(default)]
    pub hash: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FrameworkRecord {
    /// Returns the map for the given kind
    pub fn section(&self, kind: DependencyKind) -> &DependencyMap {
        match kind {
            DependencyKind::Dependencies => &self.dependencies,
            DependencyKind::DevDependencies => &self.dev_dependencies,
        }
    }

    /// Returns the map for the given kind mutably
    pub fn section_mut(&mut self, kind: DependencyKind) -> &mut DependencyMap {
        match kind {
            DependencyKind::Dependencies => &mut self.dependencies,
            DependencyKind::DevDependencies => &mut self.dev_dependencies,
        }
    }
}

impl Manifest {
    /// The manifest created for an application without a package.json
    pub fn new_application() -> Self {
        Self {
            name: Some(DEFAULT_NAME.to_string()),
            license: Some(DEFAULT_LICENSE.to_string()),
            framework: Some(FrameworkRecord::default()),
            ..Self::default()
        }
    }

    /// The manifest of the package that bundles frontend resources from jars
    pub fn new_flow_resources() -> Self {
        Self {
            name: Some(FLOW_RESOURCES_NAME.to_string()),
            license: Some(DEFAULT_LICENSE.to_string()),
            main: Some(FLOW_RESOURCES_MAIN.to_string()),
            version: Some(FLOW_RESOURCES_VERSION.to_string()),
            ..Self::default()
        }
    }

    /// Returns the top-level map for the given kind
    pub fn section(&self, kind: DependencyKind) -> &DependencyMap {
        match kind {
            DependencyKind::Dependencies => &self.dependencies,
            DependencyKind::DevDependencies => &self.dev_dependencies,
        }
    }

    /// Returns the framework record, creating an empty one if absent
    pub fn framework_mut(&mut self) -> &mut FrameworkRecord {
        self.framework.get_or_insert_with(FrameworkRecord::default)
    }

    /// Borrows the top-level map and the framework map of `kind` together
    pub fn sections_mut(
        &mut self,
        kind: DependencyKind,
    ) -> (&mut DependencyMap, &mut DependencyMap) {
        let framework = self.framework.get_or_insert_with(FrameworkRecord::default);
        let top_level = match kind {
            DependencyKind::Dependencies => &mut self.dependencies,
            DependencyKind::DevDependencies => &mut self.dev_dependencies,
        };
        (top_level, framework.section_mut(kind))
    }

    /// Framework-recorded packages that have no top-level entry
    ///
    /// Empty whenever the manifest satisfies the mirroring invariant.
    pub fn unmirrored_entries(&self) -> Vec<(DependencyKind, String)> {
        let Some(framework) = &self.framework else {
            return Vec::new();
        };

        DependencyKind::all()
            .iter()
            .flat_map(|&kind| {
                let top_level = self.section(kind);
                framework
                    .section(kind)
                    .keys()
                    .filter(|name| !top_level.contains_key(*name))
                    .map(move |name| (kind, name.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
