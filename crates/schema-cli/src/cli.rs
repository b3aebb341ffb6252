//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect the built-in tenant configuration schemas
#[derive(Parser, Debug)]
#[command(name = "schema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to ./schema.toml when present)
    #[arg(short, long, global = true, env = "SCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List built-in configuration models
    Models,

    /// Show the elements of a model
    ///
    /// Examples:
    ///   schema show search-providers
    ///   schema show tenant --json
    Show {
        /// Model name (use 'schema models' to see options)
        model: String,

        /// Output as JSON, the shape the configuration console consumes
        #[arg(long)]
        json: bool,
    },

    /// Show the role taxonomy
    Roles {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve an element tag within a model
    ///
    /// Exits with an error when the tag is not a registered element.
    Lookup {
        /// Model name
        model: String,

        /// Element local name (tag)
        local_name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble every built-in model and check the role taxonomy
    Check,
}
