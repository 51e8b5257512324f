//! Parsed semantic versions

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{version}\": {reason}")]
    Parse { version: String, reason: String },
}

impl VersionError {
    fn parse(version: &str, err: semver::Error) -> Self {
        VersionError::Parse {
            version: version.to_string(),
            reason: err.to_string(),
        }
    }

    /// The version string that failed to parse
    pub fn version(&self) -> &str {
        match self {
            VersionError::Parse { version, .. } => version,
        }
    }
}

/// A semantic version (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`).
///
/// Equality and ordering follow semantic-version precedence: build metadata
/// is carried but never compared.
#[derive(Debug, Clone)]
pub struct Version {
    inner: semver::Version,
    prerelease: Vec<String>,
    build: Vec<String>,
}

impl Version {
    /// Parse a version string
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let inner = semver::Version::parse(raw).map_err(|e| VersionError::parse(raw, e))?;
        Ok(Self::from(inner))
    }

    /// Compare this version against a raw version string.
    ///
    /// `Less` means this version orders before `other`.
    pub fn compare(&self, other: &str) -> Result<Ordering, VersionError> {
        let other = Self::parse(other)?;
        Ok(self.cmp_version(&other))
    }

    /// Compare against an already parsed version
    pub fn cmp_version(&self, other: &Version) -> Ordering {
        self.inner.cmp_precedence(&other.inner)
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Prerelease identifiers, empty for a release version
    pub fn prerelease(&self) -> &[String] {
        &self.prerelease
    }

    /// Build metadata identifiers
    pub fn build(&self) -> &[String] {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

fn identifiers(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split('.').map(str::to_string).collect()
    }
}

impl From<semver::Version> for Version {
    fn from(inner: semver::Version) -> Self {
        let prerelease = identifiers(inner.pre.as_str());
        let build = identifiers(inner.build.as_str());
        Version {
            inner,
            prerelease,
            build,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_version(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_version(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
