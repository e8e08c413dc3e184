//! CLI module
//!
//! Command-line interface for running queries.
//!
//! # Commands
//!
//! - `query` - Run an AWQL query and print the rows
//! - `flush-cache` - Empty a result cache directory

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
