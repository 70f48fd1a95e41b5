//! NMRbox package index parsing.
//!
//! The index is an apt `Packages` list: stanzas of `Key: value` lines.
//! A new record starts at every `Package:` line; blank lines are not
//! needed as separators, and lines without a colon are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::{Package, StanzaFields};
use crate::sources::lines::LossyLines;
use crate::util::Diagnostic;

/// Default location of the NMRbox apt list on an NMRbox machine.
pub const DEFAULT_INDEX_PATH: &str = "/var/lib/apt/lists/apt.nmrbox.org_ubuntu20_nmrbox_Packages";

/// Counters collected while parsing an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records seen (one per `Package:` line)
    pub stanzas: usize,

    /// Records that produced a package
    pub packages: usize,

    /// Records missing a required field
    pub dropped: usize,
}

impl ParseStats {
    /// Warn about an index that has records but no NMRbox packages at all.
    pub fn warning(&self, path: &Path) -> Option<Diagnostic> {
        if self.stanzas == 0 || self.packages > 0 {
            return None;
        }

        Some(
            Diagnostic::warning(format!(
                "none of the {} records in the package index carry NMRbox metadata",
                self.stanzas
            ))
            .with_location(path)
            .with_suggestion("Point `--index` at the NMRbox apt list, not a distribution one"),
        )
    }
}

/// Result of parsing a package index.
#[derive(Debug, Clone, Default)]
pub struct PackageList {
    pub packages: Vec<Package>,
    pub stats: ParseStats,
}

/// Split `Key: value` at the first colon. The value is trimmed; the key is not.
fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(key, value)| (key, value.trim()))
}

/// Parse an index from any buffered reader.
///
/// Malformed text never fails the parse; it only yields fewer packages.
/// Undecodable bytes are replaced, so a stray Latin-1 `Description:` does
/// not hide the records around it.
pub fn parse<R: BufRead>(reader: R) -> Result<PackageList> {
    let mut list = PackageList::default();
    let mut bag = StanzaFields::default();

    for line in LossyLines::new(reader) {
        let line = line.context("failed to read package index")?;
        let Some((key, value)) = split_field(&line) else {
            continue;
        };

        if key == "Package" {
            flush(&mut list, std::mem::take(&mut bag));
            list.stats.stanzas += 1;
        }
        bag.set(key, value);
    }
    flush(&mut list, bag);

    tracing::debug!(
        stanzas = list.stats.stanzas,
        packages = list.stats.packages,
        dropped = list.stats.dropped,
        "parsed package index"
    );

    Ok(list)
}

/// Parse an index from a string.
pub fn parse_str(content: &str) -> Result<PackageList> {
    parse(content.as_bytes())
}

/// Parse the index file at `path`.
pub fn parse_file(path: &Path) -> Result<PackageList> {
    tracing::info!("Parsing {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("failed to open package index: {}", path.display()))?;

    parse(BufReader::new(file))
        .with_context(|| format!("failed to parse package index: {}", path.display()))
}

fn flush(list: &mut PackageList, bag: StanzaFields) {
    // Nothing precedes the first `Package:` line
    if bag.is_empty() {
        return;
    }

    match Package::from_fields(&bag) {
        Some(pkg) => {
            list.stats.packages += 1;
            list.packages.push(pkg);
        }
        None => {
            list.stats.dropped += 1;
            tracing::debug!(
                "skipping stanza {} without NMRbox metadata",
                bag.package.as_deref().unwrap_or("<unnamed>")
            );
        }
    }
}
