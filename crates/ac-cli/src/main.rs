use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ac_cli::commands::{html, status, table, watch};
use ac_cli::{Cli, Commands, Config, build_source};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    // Constructed once and reused for every fetch of this process
    let source = build_source(&config)?;
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Status { json } => status::run(&mut stdout, source.as_ref(), &config, *json)?,
        Commands::Html { output } => {
            html::run(&mut stdout, source.as_ref(), &config, output.as_deref())?;
        }
        Commands::Table => table::run(&mut stdout, source.as_ref())?,
        Commands::Watch {
            interval,
            output,
            cycles,
        } => watch::run(
            &mut stdout,
            source.as_ref(),
            &config,
            *interval,
            output.clone(),
            *cycles,
        )?,
    }

    Ok(())
}
