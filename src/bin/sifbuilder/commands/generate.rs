//! `sifbuilder generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::open_index;
use sifbuilder::ops::{generate, GenerateOptions};
use sifbuilder::util::BuildConfig;

pub fn execute(args: GenerateArgs, index_path: &Path, color: bool) -> Result<()> {
    let config = BuildConfig::load(&args.config)?;
    let index = open_index(index_path, color)?;

    let opts = GenerateOptions { force: args.force };
    let result = generate(&config, &index, &opts)?;

    for software in &result.software {
        tracing::info!("  {}", software);
    }
    println!(
        "Wrote {} ({} packages)",
        result.path.display(),
        result.package_count
    );
    if let Some(image) = &result.image {
        println!(
            "Build it with: apptainer build {} {}",
            image.display(),
            result.path.display()
        );
    }

    Ok(())
}
