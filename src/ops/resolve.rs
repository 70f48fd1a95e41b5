//! Resolution session operations.

use std::path::Path;

use anyhow::Result;

use crate::resolver::{Index, Request, Resolution};
use crate::sources::{package_list, ParseStats};
use crate::util::BuildConfig;

/// An index together with the counters from parsing it.
#[derive(Debug)]
pub struct LoadedIndex {
    pub index: Index,
    pub stats: ParseStats,
}

/// Parse the package index at `path` and group it into software releases.
pub fn load_index(path: &Path) -> Result<LoadedIndex> {
    let list = package_list::parse_file(path)?;

    if list.stats.dropped > 0 {
        tracing::debug!(
            "{} of {} stanzas carry no NMRbox metadata",
            list.stats.dropped,
            list.stats.stanzas
        );
    }

    let index = Index::build(list.packages)?;
    tracing::info!("Found {} software families", index.len());

    Ok(LoadedIndex {
        index,
        stats: list.stats,
    })
}

/// Resolve every software entry of a build configuration.
pub fn resolve_config<'a>(index: &'a Index, config: &BuildConfig) -> Result<Resolution<'a>> {
    resolve_requests(index, &config.requests())
}

/// Resolve a batch of requests, logging what each release installs.
pub fn resolve_requests<'a>(index: &'a Index, requests: &[Request]) -> Result<Resolution<'a>> {
    let resolution = index.resolve_all(requests)?;

    for software in resolution.software() {
        tracing::debug!(
            "{} adds {}",
            software,
            software.package_specs(false).join(" ")
        );
        if !software.data_packages().is_empty() {
            tracing::debug!(
                "{} data packages {}",
                software,
                software
                    .data_packages()
                    .iter()
                    .map(|p| p.package_spec())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
    }

    Ok(resolution)
}
