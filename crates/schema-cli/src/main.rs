//! Tenant configuration schema CLI
//!
//! Assembles the built-in configuration models and prints them for
//! inspection, either human-readable or as the JSON the configuration
//! console consumes.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use schema_tenant::ModelCatalog;

use cli::{Cli, Commands};
use config::CliConfig;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(cmd) => execute_command(cmd, &config),
        None => {
            println!("{} Tenant configuration schema CLI", "schema".green().bold());
            println!();
            println!("Run {} for available commands.", "schema --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: &CliConfig) -> Result<()> {
    let catalog = ModelCatalog::with_builtins(&config.schema)?;
    match cmd {
        Commands::Models => commands::run_models(&catalog),
        Commands::Show { model, json } => commands::run_show(&catalog, config, &model, json),
        Commands::Roles { json } => commands::run_roles(&catalog, config, json),
        Commands::Lookup {
            model,
            local_name,
            json,
        } => commands::run_lookup(&catalog, config, &model, &local_name, json),
        Commands::Check => commands::run_check(&catalog),
    }
}
