//! Import path rewriting for frontend resources packaged in jars
//!
//! Components import files such as `./my-element.js`. When that file is
//! shipped inside a jar under one of the frontend resource roots, the
//! bundler has to load it from the `@vaadin/flow-frontend` package instead.

use std::path::{Path, PathBuf};

/// Package that bundles frontend files extracted from jars
pub const FLOW_NPM_PACKAGE_NAME: &str = "@vaadin/flow-frontend/";
/// Resource root for frontend files in jars
pub const RESOURCES_FRONTEND_DEFAULT: &str = "META-INF/frontend";
/// Resource root used by compatibility-mode jars
pub const COMPATIBILITY_RESOURCES_FRONTEND_DEFAULT: &str = "META-INF/resources/frontend";

/// Looks up packaged resources by relative path
pub trait ResourceLocator {
    /// Returns true if a resource exists at `path` (e.g. `META-INF/frontend/a.js`)
    fn has_resource(&self, path: &str) -> bool;
}

/// Locates resources below a set of directories (unpacked jars, resource folders)
#[derive(Debug, Clone, Default)]
pub struct DirectoryResourceLocator {
    roots: Vec<PathBuf>,
}

impl DirectoryResourceLocator {
    /// Create a locator over the given roots
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The directories searched, in order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLocator for DirectoryResourceLocator {
    fn has_resource(&self, path: &str) -> bool {
        self.roots
            .iter()
            .any(|root| root.join(Path::new(path)).is_file())
    }
}

/// Rewrites import paths that refer to packaged resources
#[derive(Debug, Clone)]
pub struct ResourcePathResolver<L> {
    locator: L,
}

impl<L: ResourceLocator> ResourcePathResolver<L> {
    /// Create a resolver backed by `locator`
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    /// Resolve an import path
    ///
    /// Paths starting with `@` are package imports and are returned as is.
    /// Otherwise the `./` prefix is dropped and, when a packaged resource with
    /// that name exists, the path is rewritten to the flow-frontend package.
    /// Anything else is returned unchanged.
    pub fn resolve(&self, import_path: &str) -> String {
        if import_path.starts_with('@') {
            return import_path.to_string();
        }

        let resource = strip_relative_prefix(import_path);
        if !self.has_packaged_resource(resource) {
            return import_path.to_string();
        }

        if !import_path.starts_with("./") {
            tracing::warn!(
                "Use the './' prefix for files in JAR files: '{}', please update your component.",
                import_path
            );
        }
        format!("{}{}", FLOW_NPM_PACKAGE_NAME, resource)
    }

    fn has_packaged_resource(&self, resource: &str) -> bool {
        [RESOURCES_FRONTEND_DEFAULT, COMPATIBILITY_RESOURCES_FRONTEND_DEFAULT]
            .iter()
            .any(|root| self.locator.has_resource(&format!("{}/{}", root, resource)))
    }
}

/// Drops a leading `.` followed by one or more `/`
fn strip_relative_prefix(path: &str) -> &str {
    match path.strip_prefix('.') {
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => path,
    }
}
