//! Software - one resolved (family, version) release.

use std::fmt;

use crate::core::Package;
use crate::resolver::version;

/// A software release and the Debian packages that install it.
#[derive(Debug, Clone)]
pub struct Software {
    family: String,
    version: String,

    /// Code packages, in index order
    packages: Vec<Package>,

    /// Data packages, in index order
    data_packages: Vec<Package>,
}

impl Software {
    /// Create a new software release.
    ///
    /// A release made only of data packages installs them as its packages.
    pub fn new(
        family: impl Into<String>,
        version: impl Into<String>,
        packages: Vec<Package>,
        data_packages: Vec<Package>,
    ) -> Self {
        let (packages, data_packages) = if packages.is_empty() {
            (data_packages, Vec::new())
        } else {
            (packages, data_packages)
        };

        Software {
            family: family.into(),
            version: version.into(),
            packages,
            data_packages,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn data_packages(&self) -> &[Package] {
        &self.data_packages
    }

    /// Highest Debian version among the code packages.
    pub fn max_package_version(&self) -> Option<&str> {
        version::max_version(self.packages.iter().map(Package::package_version))
    }

    /// Package specifiers to install, optionally followed by data packages.
    pub fn package_specs(&self, include_data: bool) -> Vec<String> {
        let data: &[Package] = if include_data {
            &self.data_packages
        } else {
            &[]
        };
        self.packages
            .iter()
            .chain(data)
            .map(Package::package_spec)
            .collect()
    }
}

impl fmt::Display for Software {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, version: &str) -> Package {
        Package::new(name, version, "topspin", "4.1")
    }

    #[test]
    fn test_data_promoted_when_no_code() {
        let sw = Software::new(
            "TOPSPIN",
            "4.1",
            vec![],
            vec![pkg("nmrbox-topspin-data", "4.1-2")],
        );

        assert_eq!(sw.packages().len(), 1);
        assert!(sw.data_packages().is_empty());
        assert_eq!(sw.max_package_version(), Some("4.1-2"));
    }

    #[test]
    fn test_data_kept_separate_with_code() {
        let sw = Software::new(
            "TOPSPIN",
            "4.1",
            vec![pkg("nmrbox-topspin", "4.1-1")],
            vec![pkg("nmrbox-topspin-data", "4.1-9")],
        );

        assert_eq!(sw.packages().len(), 1);
        assert_eq!(sw.data_packages().len(), 1);
        // Data packages never contribute to the maximum
        assert_eq!(sw.max_package_version(), Some("4.1-1"));
        assert_eq!(sw.package_specs(false), vec!["nmrbox-topspin=4.1-1"]);
        assert_eq!(
            sw.package_specs(true),
            vec!["nmrbox-topspin=4.1-1", "nmrbox-topspin-data=4.1-9"]
        );
    }

    #[test]
    fn test_max_package_version_uses_debian_order() {
        let sw = Software::new(
            "TOPSPIN",
            "4.1",
            vec![pkg("a", "9"), pkg("b", "10"), pkg("c", "2")],
            vec![],
        );

        assert_eq!(sw.max_package_version(), Some("10"));
    }

    #[test]
    fn test_display() {
        let sw = Software::new("TOPSPIN", "4.1", vec![pkg("a", "1")], vec![]);
        assert_eq!(sw.to_string(), "TOPSPIN 4.1");
    }
}
