//! `sifbuilder resolve` command

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::ResolveArgs;
use crate::commands::open_index;
use sifbuilder::ops::resolve_requests;
use sifbuilder::util::diagnostic::suggestions;
use sifbuilder::util::BuildConfig;

pub fn execute(args: ResolveArgs, index_path: &Path, color: bool) -> Result<()> {
    let config = args.config.as_deref().map(BuildConfig::load).transpose()?;

    let mut requests = config
        .as_ref()
        .map(BuildConfig::requests)
        .unwrap_or_default();
    requests.extend(args.software);

    if requests.is_empty() {
        bail!("no software requested\n{}", suggestions::NO_REQUESTS);
    }

    let include_data = args.data || config.as_ref().is_some_and(|c| c.data);

    let index = open_index(index_path, color)?;
    let resolution = resolve_requests(&index, &requests)?;

    if args.json {
        let summary = resolution.summary(include_data);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for description in resolution.descriptions() {
        println!("# {}", description);
    }
    for spec in resolution.package_specs(include_data) {
        println!("{}", spec);
    }

    Ok(())
}
