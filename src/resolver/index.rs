//! Software index: family -> software version -> `Software`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::{Package, Software};
use crate::resolver::errors::ResolveError;
use crate::resolver::version;

/// Family that never resolves; its packages are dropped from the index.
pub const RESERVED_FAMILY: &str = "UTILITY";

/// All software releases found in a package index.
///
/// Built once from parsed packages and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Index {
    families: BTreeMap<String, BTreeMap<String, Software>>,
}

impl Index {
    /// Group packages into software releases.
    ///
    /// Within each release, code and data packages are kept apart, and of
    /// several packages sharing a Debian name only the highest version is
    /// kept. Two such packages with equal versions mean the index is corrupt.
    pub fn build<I>(packages: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = Package>,
    {
        let mut grouped: BTreeMap<(String, String), (Vec<Package>, Vec<Package>)> = BTreeMap::new();

        for pkg in packages {
            if pkg.software_family() == RESERVED_FAMILY {
                continue;
            }

            let key = (
                pkg.software_family().to_string(),
                pkg.software_version().to_string(),
            );
            let (code, data) = grouped.entry(key).or_default();
            if pkg.is_data() {
                data.push(pkg);
            } else {
                code.push(pkg);
            }
        }

        let mut families: BTreeMap<String, BTreeMap<String, Software>> = BTreeMap::new();
        for ((family, software_version), (code, data)) in grouped {
            let code = latest_by_name(code)?;
            let data = latest_by_name(data)?;
            let software = Software::new(family.clone(), software_version.clone(), code, data);

            tracing::debug!(
                "{} -> {}",
                software,
                software.package_specs(true).join(" ")
            );

            families
                .entry(family)
                .or_default()
                .insert(software_version, software);
        }

        Ok(Index { families })
    }

    /// Look up a family. The name is case-insensitive.
    pub fn family(&self, family: &str) -> Option<&BTreeMap<String, Software>> {
        self.families.get(&family.to_uppercase())
    }

    /// Look up one release.
    pub fn get(&self, family: &str, version: &str) -> Option<&Software> {
        self.family(family)?.get(version)
    }

    /// Iterate over family names in sorted order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Iterate over every release.
    pub fn software(&self) -> impl Iterator<Item = &Software> {
        self.families.values().flat_map(BTreeMap::values)
    }

    /// Software versions of a family, sorted by Debian version ordering.
    pub fn versions(&self, family: &str) -> Vec<&str> {
        let mut versions: Vec<&str> = self
            .family(family)
            .map(|versions| versions.keys().map(String::as_str).collect())
            .unwrap_or_default();
        versions.sort_by(|a, b| version::compare(a, b));
        versions
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Keep the highest version of each package name, in first-seen order.
fn latest_by_name(packages: Vec<Package>) -> Result<Vec<Package>, ResolveError> {
    let mut latest: Vec<Package> = Vec::with_capacity(packages.len());

    for pkg in packages {
        let Some(pos) = latest
            .iter()
            .position(|p| p.package_name() == pkg.package_name())
        else {
            latest.push(pkg);
            continue;
        };

        match version::compare(pkg.package_version(), latest[pos].package_version()) {
            Ordering::Greater => latest[pos] = pkg,
            Ordering::Less => {}
            Ordering::Equal => {
                return Err(ResolveError::DuplicatePackageVersion {
                    package: pkg.package_name().to_string(),
                    version: pkg.package_version().to_string(),
                    family: pkg.software_family().to_string(),
                    software_version: pkg.software_version().to_string(),
                });
            }
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    fn pkg(name: &str, version: &str, family: &str, software_version: &str) -> Package {
        Package::new(name, version, family, software_version)
    }

    fn specs(sw: &Software) -> Vec<String> {
        sw.package_specs(true)
    }

    #[test]
    fn test_groups_by_family_and_version() {
        let index = Index::build(vec![
            pkg("nmrbox-nmrpipe", "10.9-1", "nmrpipe", "10.9"),
            pkg("nmrbox-nmrpipe", "11.2-1", "nmrpipe", "11.2"),
            pkg("nmrbox-sparky", "3.1", "sparky", "3.1"),
        ])
        .unwrap();

        let pairs: BTreeSet<(String, String)> = index
            .software()
            .map(|s| (s.family().to_string(), s.version().to_string()))
            .collect();
        let expected: BTreeSet<(String, String)> = [
            ("NMRPIPE", "10.9"),
            ("NMRPIPE", "11.2"),
            ("SPARKY", "3.1"),
        ]
        .into_iter()
        .map(|(f, v)| (f.to_string(), v.to_string()))
        .collect();

        assert_eq!(pairs, expected);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_utility_excluded() {
        let index = Index::build(vec![
            pkg("nmrbox-utils", "1.0", "utility", "1.0"),
            pkg("nmrbox-sparky", "3.1", "sparky", "3.1"),
        ])
        .unwrap();

        assert!(index.family("UTILITY").is_none());
        assert_eq!(index.families().collect::<Vec<_>>(), vec!["SPARKY"]);
    }

    #[test]
    fn test_collapse_keeps_highest_version_in_first_seen_order() {
        let index = Index::build(vec![
            pkg("nmrbox-ccpn", "9", "ccpn", "3.0"),
            pkg("nmrbox-ccpn-lib", "1", "ccpn", "3.0"),
            pkg("nmrbox-ccpn", "10", "ccpn", "3.0"),
            pkg("nmrbox-ccpn", "2", "ccpn", "3.0"),
        ])
        .unwrap();

        let sw = index.get("ccpn", "3.0").unwrap();
        assert_eq!(specs(sw), vec!["nmrbox-ccpn=10", "nmrbox-ccpn-lib=1"]);
    }

    #[test]
    fn test_code_and_data_partitioned() {
        let index = Index::build(vec![
            pkg("nmrbox-talos-data", "2", "talos", "4.0"),
            pkg("nmrbox-talos", "1", "talos", "4.0"),
        ])
        .unwrap();

        let sw = index.get("TALOS", "4.0").unwrap();
        assert_eq!(sw.packages().len(), 1);
        assert_eq!(sw.packages()[0].package_name(), "nmrbox-talos");
        assert_eq!(sw.data_packages()[0].package_name(), "nmrbox-talos-data");
    }

    #[test]
    fn test_data_only_release_is_promoted() {
        let index =
            Index::build(vec![pkg("nmrbox-bmrb-data", "1.0", "bmrb", "2024")]).unwrap();

        let sw = index.get("BMRB", "2024").unwrap();
        assert_eq!(sw.packages().len(), 1);
        assert!(sw.data_packages().is_empty());
    }

    #[test]
    fn test_duplicate_equal_version_is_fatal() {
        let err = Index::build(vec![
            pkg("nmrbox-ccpn", "3.0-1", "ccpn", "3.0"),
            pkg("nmrbox-ccpn", "3.0-1", "ccpn", "3.0"),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::DuplicatePackageVersion { ref package, .. } if package == "nmrbox-ccpn"
        ));
    }

    #[test]
    fn test_debian_equal_versions_are_duplicates() {
        let err = Index::build(vec![
            pkg("nmrbox-ccpn", "1.0", "ccpn", "3.0"),
            pkg("nmrbox-ccpn", "1.00", "ccpn", "3.0"),
        ])
        .unwrap_err();

        match err {
            ResolveError::DuplicatePackageVersion { package, version, .. } => {
                assert_eq!(package, "nmrbox-ccpn");
                assert_eq!(version, "1.00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_versions_sorted_by_debian_order() {
        let index = Index::build(vec![
            pkg("a", "1", "x", "10"),
            pkg("a", "2", "x", "9"),
            pkg("a", "3", "x", "9.1"),
        ])
        .unwrap();

        assert_eq!(index.versions("x"), vec!["9", "9.1", "10"]);
        assert!(index.versions("nosuch").is_empty());
    }
}
