//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing package.json files
//! - VersionError: Version strings that do not follow the version grammar
//! - ConfigError: Issues with CLI configuration and default dependency tables
//! - IoError: File system operation failures outside manifest files

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version grammar errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file (or create its parent directory)
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid package.json document
    #[error("malformed manifest {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    /// The in-memory manifest could not be serialized
    #[error("failed to serialize manifest: {message}")]
    Serialize { message: String },
}

/// Errors related to version strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The string does not match `[^~=v]MAJOR[.MINOR[.PATCH]][qualifier]`
    #[error("malformed version '{version}'")]
    Malformed { version: String },

    /// A malformed version found while reconciling a manifest entry
    #[error("malformed version '{version}' for package '{package}' in {section}")]
    MalformedEntry {
        package: String,
        section: String,
        version: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Default dependency table could not be parsed
    #[error("invalid default dependency table {path}: {message}")]
    InvalidDefaults { path: PathBuf, message: String },

    /// Default dependency table uses a format this build does not understand
    #[error("unsupported default dependency table format version {found} (expected {expected})")]
    UnsupportedDefaultsVersion { found: u32, expected: u32 },

    /// Dependency argument is not of the form `name@version`
    #[error("invalid dependency '{value}': {message}")]
    InvalidDependency { value: String, message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Malformed error
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl VersionError {
    /// Creates a new Malformed error
    pub fn malformed(version: impl Into<String>) -> Self {
        VersionError::Malformed {
            version: version.into(),
        }
    }

    /// Attaches the offending package and manifest section
    pub fn in_entry(self, package: impl Into<String>, section: impl Into<String>) -> Self {
        let version = match self {
            VersionError::Malformed { version } => version,
            VersionError::MalformedEntry { version, .. } => version,
        };
        VersionError::MalformedEntry {
            package: package.into(),
            section: section.into(),
            version,
        }
    }

    /// The version string that failed to parse
    pub fn version(&self) -> &str {
        match self {
            VersionError::Malformed { version } => version,
            VersionError::MalformedEntry { version, .. } => version,
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidDependency error
    pub fn invalid_dependency(value: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidDependency {
            value: value.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
