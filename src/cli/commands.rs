//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Call a paginated REST API by operation name
#[derive(Parser, Debug)]
#[command(name = "hubpager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token (falls back to HUBPAGER_TOKEN, then GITHUB_TOKEN)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an operation and print the merged result
    Call {
        /// Operation name (see `operations`)
        operation: String,

        /// Positional path arguments
        args: Vec<String>,
    },

    /// List operations and their URL templates
    Operations,

    /// Parse a Link header value and print its relations
    Links {
        /// Raw header value
        header: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
