//! CLI argument definitions using clap
//!
//! Commands:
//! - biblio serve --config <path> [--host H] [--port P]
//! - biblio init --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// biblio - a small self-hostable bookstore catalog REST API
#[derive(Parser, Debug)]
#[command(name = "biblio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the catalog HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./biblio.json")]
        config: PathBuf,

        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a default configuration file and seed an empty catalog
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./biblio.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
