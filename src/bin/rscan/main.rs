//! rscan CLI - discovers migration resources and types across locations

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use resource_scanner::GlobalContext;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("resource_scanner=debug")
    } else {
        EnvFilter::new("resource_scanner=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Completions(args) => commands::completions::execute(args),
        command => {
            let mut ctx = GlobalContext::new()?;
            ctx.set_verbose(cli.verbose);
            let config = ctx.load_config(cli.config.as_deref())?;

            match command {
                Commands::Scan(args) => commands::scan::execute(args, &ctx, &config),
                Commands::Resolve(args) => commands::resolve::execute(args, &ctx, &config),
                Commands::Filter(args) => commands::filter::execute(args, &ctx, &config),
                Commands::Types(args) => commands::types::execute(args, &ctx, &config),
                Commands::Migrations(args) => commands::migrations::execute(args, &ctx, &config),
                Commands::Completions(args) => commands::completions::execute(args),
            }
        }
    }
}
