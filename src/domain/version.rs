//! Version parsing and comparison for package.json version strings
//!
//! Handles version formats:
//! - Exact: `1.2.3`, `1.2`, `1`
//! - Prefixed: `^1.2.3`, `~1.2.3`, `=1.2.3`, `v1.2.3`
//! - Qualified: `1.2.3-beta1`, `1.2.3.alpha.2`, `1.2.3+build5`
//!
//! Prefixes are accepted but take no part in comparison. Two versions whose
//! numeric parts match but whose qualifiers differ are incomparable: neither
//! is newer and they are not equal.

use crate::error::VersionError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\^~=v]?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:[-.+]?([0-9A-Za-z](?:[0-9A-Za-z.+\-]*[0-9A-Za-z])?))?$",
    )
    .unwrap()
});

/// A parsed version: numeric triple plus optional qualifier
#[derive(Debug, Clone, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Trailing qualifier without its separator (e.g. `beta1`)
    pub qualifier: Option<String>,
    raw: String,
}

impl Version {
    /// Parse a version string
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let trimmed = version.trim();
        let caps = VERSION_RE
            .captures(trimmed)
            .ok_or_else(|| VersionError::malformed(version))?;

        let number = |index: usize| -> Result<u64, VersionError> {
            match caps.get(index) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| VersionError::malformed(version)),
                None => Ok(0),
            }
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            qualifier: caps.get(4).map(|m| m.as_str().to_string()),
            raw: trimmed.to_string(),
        })
    }

    /// The version text as it was parsed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if this version is strictly newer than `other`
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.partial_cmp(other) == Some(Ordering::Greater)
    }

    /// Returns true if numeric parts and qualifier are all equal
    pub fn is_equal_to(&self, other: &Version) -> bool {
        self == other
    }

    fn numbers(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.numbers() == other.numbers() && self.qualifier == other.qualifier
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.numbers().cmp(&other.numbers()) {
            Ordering::Equal if self.qualifier == other.qualifier => Some(Ordering::Equal),
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Returns true if version string `a` is strictly newer than `b`
pub fn is_newer(a: &str, b: &str) -> Result<bool, VersionError> {
    Ok(Version::parse(a)?.is_newer_than(&Version::parse(b)?))
}

/// Returns true if version strings `a` and `b` denote the same version
pub fn is_equal(a: &str, b: &str) -> Result<bool, VersionError> {
    Ok(Version::parse(a)?.is_equal_to(&Version::parse(b)?))
}
