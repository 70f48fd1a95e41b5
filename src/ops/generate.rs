//! Implementation of `sifbuilder generate`.
//!
//! Renders an Apptainer definition file that installs the resolved software
//! on top of a local base image.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::ops::resolve::resolve_config;
use crate::resolver::{Index, Resolution};
use crate::util::diagnostic::suggestions;
use crate::util::BuildConfig;

/// Options for writing a definition file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Overwrite an existing definition
    pub force: bool,
}

/// Outcome of a successful generate.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Path of the written definition
    pub path: PathBuf,

    /// Image to build from it, when the config names one
    pub image: Option<PathBuf>,

    /// `FAMILY VERSION` of each resolved release
    pub software: Vec<String>,

    /// Number of packages on the install line
    pub package_count: usize,
}

/// Render the definition text.
///
/// Named packages are installed before resolved ones.
pub fn render_definition(config: &BuildConfig, resolution: &Resolution<'_>) -> String {
    let named = config.named_packages();
    let install: Vec<String> = named
        .iter()
        .cloned()
        .chain(resolution.package_specs(config.data))
        .collect();

    let mut out = String::new();
    out.push_str("BootStrap: localimage\n");
    out.push_str(&format!("From: {}\n", config.base.display()));

    out.push_str("\n# software specified\n");
    for description in resolution.descriptions() {
        out.push_str(&format!("# {}\n", description));
    }

    out.push_str("\n# packages specified\n");
    for spec in &named {
        out.push_str(&format!("# {}\n", spec));
    }

    out.push_str("\n%post\n");
    out.push_str("\texport DEBIAN_FRONTEND=noninteractive\n");
    out.push_str("\tapt-get -qq update\n");
    if !install.is_empty() {
        out.push_str(&format!("\tapt-get -qq install {}\n", install.join(" ")));
    }

    out.push_str("\n%environment\n");
    out.push_str("    export LC_ALL=C\n");

    out
}

/// Resolve the configuration against `index` and write the definition file.
///
/// Without `force`, an existing definition or image stops the run before
/// anything is written.
pub fn generate(
    config: &BuildConfig,
    index: &Index,
    opts: &GenerateOptions,
) -> Result<GenerateResult> {
    let path = config.definition.as_path();

    if !opts.force {
        let mut outputs = std::iter::once(path).chain(config.sif.as_deref());
        if let Some(existing) = outputs.find(|p| p.exists()) {
            bail!(
                "`{}` already present\n{}",
                existing.display(),
                suggestions::DEFINITION_EXISTS
            );
        }
    }

    let resolution = resolve_config(index, config)?;
    let content = render_definition(config, &resolution);

    create_parent(path)?;
    tracing::info!("Generating {}", path.display());
    fs::write(path, &content)
        .with_context(|| format!("failed to write definition: {}", path.display()))?;

    let package_count =
        config.named_packages().len() + resolution.package_specs(config.data).len();

    Ok(GenerateResult {
        path: path.to_path_buf(),
        image: config.sif.clone(),
        software: resolution.descriptions(),
        package_count,
    })
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display())),
        _ => Ok(()),
    }
}
