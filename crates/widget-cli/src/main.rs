//! Widget Sync CLI
//!
//! Installs externally authored Android widget assets into a generated
//! native project, standalone or as a build plugin.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Android widget asset sync", "widget-sync".green().bold());
            println!();
            println!("Run {} for available commands.", "widget-sync --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr so plugin mode keeps stdout for JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Plugin { options } => commands::run_plugin(options.as_deref()),
        Commands::Sync {
            package,
            platform_root,
            skip_native,
            paths,
        } => commands::run_sync(&paths, package.as_deref(), platform_root, skip_native),
        Commands::Status { package, paths } => commands::run_status(&paths, package.as_deref()),
    }
}
