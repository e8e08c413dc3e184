//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AWQL reporting client
#[derive(Parser, Debug)]
#[command(name = "adwql")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection string (`adwords?adwords_id=...`)
    #[arg(short, long, global = true)]
    pub dsn: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "csv")]
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
    /// Run an AWQL query and print the rows
    Query {
        /// Query text, `?` marks a placeholder
        query: String,

        /// Placeholder values, in order (integers are bound as numbers)
        #[arg(short, long = "arg")]
        args: Vec<String>,
    },

    /// Remove every entry of a cache directory
    FlushCache {
        /// Cache directory
        dir: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV with a header row
    Csv,
    /// One JSON object per row
    Json,
}
