//! sifbuilder CLI - resolve NMRbox software into container definitions

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sifbuilder::util::diagnostic;
use sifbuilder::ResolveError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        match e.downcast_ref::<ResolveError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("sifbuilder=debug")
    } else {
        EnvFilter::new("sifbuilder=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &cli.index, color),
        Commands::Generate(args) => commands::generate::execute(args, &cli.index, color),
        Commands::List(args) => commands::list::execute(args, &cli.index, color),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
