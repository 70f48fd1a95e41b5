//! `sifbuilder list` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ListArgs;
use crate::commands::open_index;
use sifbuilder::sources::installed_families_file;
use sifbuilder::{Index, Request, ResolveError};

pub fn execute(args: ListArgs, index_path: &Path, color: bool) -> Result<()> {
    if args.installed {
        for family in installed_families_file(&args.status)? {
            println!("{}", family);
        }
        return Ok(());
    }

    let index = open_index(index_path, color)?;

    let families: Vec<&str> = match &args.family {
        Some(family) => {
            let wanted = family.to_uppercase();
            if index.family(&wanted).is_none() {
                return Err(ResolveError::UnknownFamily { family: wanted }.into());
            }
            index.families().filter(|f| *f == wanted).collect()
        }
        None => index.families().collect(),
    };

    for family in families {
        print_family(&index, family)?;
    }

    Ok(())
}

fn print_family(index: &Index, family: &str) -> Result<()> {
    let latest: Vec<&str> = index
        .resolve(&Request::latest(family))?
        .iter()
        .map(|s| s.version())
        .collect();

    println!("{}", family);
    for version in index.versions(family) {
        let marker = if latest.contains(&version) {
            " (latest)"
        } else {
            ""
        };
        println!("    {}{}", version, marker);
    }

    Ok(())
}
