//! Package - one Debian package carrying NMRbox software metadata.
//!
//! A Package is built from a single index stanza. Its identity is the
//! software release it belongs to, not its Debian name: a "core" and a
//! "data" package of the same release compare equal.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Substring of a Debian package name that marks a data package.
const DATA_MARKER: &str = "data";

/// Fields of one index stanza that matter for software resolution.
///
/// Every other key of the stanza is discarded while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StanzaFields {
    /// `Package:` - Debian package name
    pub package: Option<String>,

    /// `Version:` - Debian package version
    pub version: Option<String>,

    /// `Nmrbox-Software:` - software family
    pub software: Option<String>,

    /// `Nmrbox-Version:` - software version tag
    pub software_version: Option<String>,
}

impl StanzaFields {
    /// Record a `Key: value` pair. Returns false if the key is not tracked.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "Package" => &mut self.package,
            "Version" => &mut self.version,
            "Nmrbox-Software" => &mut self.software,
            "Nmrbox-Version" => &mut self.software_version,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    /// Check whether no tracked field has been seen.
    pub fn is_empty(&self) -> bool {
        self.package.is_none()
            && self.version.is_none()
            && self.software.is_none()
            && self.software_version.is_none()
    }
}

/// A Debian package that belongs to an NMRbox software release.
#[derive(Debug, Clone)]
pub struct Package {
    package_name: String,
    package_version: String,
    software_family: String,
    software_version: String,
}

impl Package {
    /// Create a new package. The family is normalized to uppercase.
    pub fn new(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
        software_family: &str,
        software_version: impl Into<String>,
    ) -> Self {
        Package {
            package_name: package_name.into(),
            package_version: package_version.into(),
            software_family: software_family.to_uppercase(),
            software_version: software_version.into(),
        }
    }

    /// Build a package from stanza fields.
    ///
    /// Returns `None` unless the package name, Debian version, software
    /// family and software version are all present.
    pub fn from_fields(fields: &StanzaFields) -> Option<Self> {
        let (Some(name), Some(version), Some(software), Some(software_version)) = (
            fields.package.as_deref(),
            fields.version.as_deref(),
            fields.software.as_deref(),
            fields.software_version.as_deref(),
        ) else {
            return None;
        };

        Some(Package::new(name, version, software, software_version))
    }

    /// Debian package name.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Debian package version.
    pub fn package_version(&self) -> &str {
        &self.package_version
    }

    /// Uppercase software family.
    pub fn software_family(&self) -> &str {
        &self.software_family
    }

    /// Software version tag.
    pub fn software_version(&self) -> &str {
        &self.software_version
    }

    /// Check if this package only ships data.
    pub fn is_data(&self) -> bool {
        self.package_name.contains(DATA_MARKER)
    }

    /// Specifier for `apt-get install`: `name=version`.
    pub fn package_spec(&self) -> String {
        format!("{}={}", self.package_name, self.package_version)
    }

    /// Human-readable software release: `FAMILY VERSION`.
    pub fn software_description(&self) -> String {
        format!("{} {}", self.software_family, self.software_version)
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.software_family == other.software_family
            && self.software_version == other.software_version
    }
}

impl Eq for Package {}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.software_family.hash(state);
        self.software_version.hash(state);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.package_spec())
    }
}
