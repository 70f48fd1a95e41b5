//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use sifbuilder::sources::{DEFAULT_INDEX_PATH, DEFAULT_STATUS_PATH};
use sifbuilder::Request;

/// sifbuilder - resolve NMRbox software into container definitions
#[derive(Parser)]
#[command(name = "sifbuilder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// NMRbox package index (apt Packages list)
    #[arg(long, global = true, env = "SIFBUILDER_INDEX", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve software to Debian package specifiers
    Resolve(ResolveArgs),

    /// Write a container definition file from a build config
    Generate(GenerateArgs),

    /// List software families and versions in the index, or installed ones
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Software to resolve, as FAMILY or FAMILY=VERSION
    pub software: Vec<Request>,

    /// Build config whose `software:` entries are resolved first
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Include data packages
    #[arg(long)]
    pub data: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Build config (YAML)
    pub config: PathBuf,

    /// Overwrite an existing definition file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show this family
    pub family: Option<String>,

    /// List families installed on this machine instead of the index
    #[arg(long, conflicts_with = "family")]
    pub installed: bool,

    /// dpkg status file read by `--installed`
    #[arg(long, env = "SIFBUILDER_STATUS", default_value = DEFAULT_STATUS_PATH)]
    pub status: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
