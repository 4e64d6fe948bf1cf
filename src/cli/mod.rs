//! CLI module for biblio
//!
//! Provides the command-line interface:
//! - serve: load config, open the catalog and enter the serving loop
//! - init: write a default config file and seed an empty catalog

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::run;
pub use errors::{CliError, CliResult};
