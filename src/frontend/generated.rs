//! Discovery of generated frontend modules

use crate::error::IoError;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path};

/// Prefix that separates generated modules from project frontend files
pub const GENERATED_PREFIX: &str = "GENERATED/";

/// List the `.js` modules below `dir`
///
/// Files inside `node_modules` and files whose path ends with one of
/// `excludes` are skipped. Paths are returned relative to `dir`, with `/`
/// separators and [`GENERATED_PREFIX`] prepended. A missing directory
/// yields an empty set.
pub fn generated_modules(dir: &Path, excludes: &[&str]) -> Result<BTreeSet<String>, IoError> {
    let mut modules = BTreeSet::new();
    if !dir.is_dir() {
        return Ok(modules);
    }

    let excludes: Vec<String> = excludes.iter().map(|e| unix_path(e)).collect();
    collect(dir, dir, &excludes, &mut modules)?;
    Ok(modules)
}

fn collect(
    base: &Path,
    dir: &Path,
    excludes: &[String],
    output: &mut BTreeSet<String>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(|e| IoError::generic(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| IoError::generic(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == "node_modules") {
                continue;
            }
            collect(base, &path, excludes, output)?;
            continue;
        }

        if path.extension() != Some(OsStr::new("js")) {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        let relative = relative_unix_path(relative);
        if excludes.iter().any(|exclude| relative.ends_with(exclude.as_str())) {
            continue;
        }

        output.insert(format!("{}{}", GENERATED_PREFIX, relative));
    }

    Ok(())
}

fn unix_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn relative_unix_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
