//! Command implementations

pub mod completions;
pub mod generate;
pub mod list;
pub mod resolve;

use std::path::Path;

use anyhow::{bail, Result};

use sifbuilder::ops::load_index;
use sifbuilder::util::diagnostic::{self, suggestions};
use sifbuilder::Index;

/// Load the package index, pointing at `--index` when it is missing.
///
/// An index without a single NMRbox package is loaded anyway, with a warning.
pub fn open_index(path: &Path, color: bool) -> Result<Index> {
    if !path.is_file() {
        bail!(
            "package index not found: {}\n{}",
            path.display(),
            suggestions::MISSING_INDEX
        );
    }

    let loaded = load_index(path)?;
    if let Some(warning) = loaded.stats.warning(path) {
        diagnostic::emit(&warning, color);
    }

    Ok(loaded.index)
}
