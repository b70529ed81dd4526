//! msync CLI
//!
//! Resolves layered per-file configuration and lists which files are managed.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, LayerArgs, TargetArgs};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Verbose forces debug output; otherwise RUST_LOG decides
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.layers),
        None => {
            // No command provided - show help hint
            println!("{} layered file configuration", "msync".green().bold());
            println!();
            println!("Run {} for available commands.", "msync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, layers: &LayerArgs) -> Result<()> {
    let resolver = context::load_resolver(layers)?;
    match cmd {
        Commands::Resolve { target, json } => commands::run_resolve(&resolver, &target, json),
        Commands::Managed(args) => with_targets(&args, |targets| {
            commands::run_managed(&resolver, targets, args.json)
        }),
        Commands::Unmanaged(args) => with_targets(&args, |targets| {
            commands::run_unmanaged(&resolver, targets, args.json)
        }),
        Commands::Status(args) => with_targets(&args, |targets| {
            commands::run_status(&resolver, targets, args.json)
        }),
    }
}

fn with_targets(args: &TargetArgs, run: impl FnOnce(&[String]) -> Result<()>) -> Result<()> {
    let targets = context::collect_targets(args)?;
    run(&targets)
}
