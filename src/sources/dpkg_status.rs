//! Installed NMRbox software, read from the dpkg status file.
//!
//! Unlike the apt list, the status file separates stanzas with blank lines.
//! A package counts as installed when its `Status:` is exactly
//! `install ok installed`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::sources::lines::LossyLines;

/// Default location of the dpkg status database.
pub const DEFAULT_STATUS_PATH: &str = "/var/lib/dpkg/status";

const INSTALLED: &str = "install ok installed";

#[derive(Default)]
struct Stanza {
    status: Option<String>,
    software: Option<String>,
}

impl Stanza {
    fn installed_family(self) -> Option<String> {
        match (self.status, self.software) {
            (Some(status), Some(software)) if status == INSTALLED => Some(software.to_uppercase()),
            _ => None,
        }
    }
}

/// Software families with at least one installed package, sorted.
pub fn installed_families<R: BufRead>(reader: R) -> Result<BTreeSet<String>> {
    let mut families = BTreeSet::new();
    let mut stanza = Stanza::default();

    for line in LossyLines::new(reader) {
        let line = line.context("failed to read dpkg status")?;

        if line.trim().is_empty() {
            families.extend(std::mem::take(&mut stanza).installed_family());
            continue;
        }

        // Continuation lines belong to the previous field
        if line.starts_with(char::is_whitespace) {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let value = Some(value.trim().to_string());
            match key.trim() {
                "Status" => stanza.status = value,
                "Nmrbox-Software" => stanza.software = value,
                _ => {}
            }
        }
    }
    families.extend(stanza.installed_family());

    tracing::debug!("{} installed NMRbox families", families.len());
    Ok(families)
}

/// Read installed families from the status file at `path`.
pub fn installed_families_file(path: &Path) -> Result<BTreeSet<String>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open dpkg status: {}", path.display()))?;

    installed_families(BufReader::new(file))
        .with_context(|| format!("failed to parse dpkg status: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    const STATUS: &str = "\
Package: nmrbox-sparky
Status: install ok installed
Version: 3.115-1
Nmrbox-Software: sparky
Nmrbox-Version: 3.115

Package: nmrbox-talos
Status: deinstall ok config-files
Nmrbox-Software: talos

Package: libc6
Status: install ok installed
Description: GNU C Library
 Status: install ok installed

Package: nmrbox-nmrpipe
Status: install ok installed
Nmrbox-Software: NMRPipe
Nmrbox-Version: 11.2";

    fn families(text: &str) -> Vec<String> {
        installed_families(text.as_bytes())
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_installed_families() {
        assert_eq!(families(STATUS), vec!["NMRPIPE", "SPARKY"]);
    }

    #[test]
    fn test_families_are_deduplicated() {
        let status = "Status: install ok installed\nNmrbox-Software: x\n\n\
                      Status: install ok installed\nNmrbox-Software: X\n";
        assert_eq!(families(status), vec!["X"]);
    }

    #[test]
    fn test_fields_do_not_leak_across_stanzas() {
        let status = "Status: install ok installed\n\nNmrbox-Software: x\n";
        assert!(families(status).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let bytes: &[u8] =
            b"Maintainer: Jos\xe9\nStatus: install ok installed\nNmrbox-Software: x\n";
        let found = installed_families(bytes).unwrap();
        assert!(found.contains("X"));
    }

    #[test]
    fn test_file_loader() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("status");
        fs::write(&path, STATUS).unwrap();

        assert_eq!(installed_families_file(&path).unwrap().len(), 2);
        let err = installed_families_file(&tmp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("failed to open dpkg status"));
    }
}
