//! CLI command implementations
//!
//! `serve` loads the configuration, opens or creates the catalog and
//! enters the serving loop. `init` writes a default configuration file
//! and seeds an empty checksummed snapshot so a fresh deployment starts
//! from a known state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::http_server::{HttpServer, ServerConfig};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

const SNAPSHOT_FILE: &str = "catalog.snapshot";

/// Entry point called from `main`.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();

    match cli.command {
        Command::Serve { config, host, port } => serve(&config, host, port),
        Command::Init { config } => init(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the config file, falling back to defaults when it is absent.
fn load_config(path: &Path) -> CliResult<ServerConfig> {
    if !path.exists() {
        return Ok(ServerConfig::default());
    }
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
}

fn open_catalog(config: &ServerConfig) -> CliResult<Catalog> {
    match &config.data_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            Ok(Catalog::open(dir.join(SNAPSHOT_FILE))?)
        }
        None => Ok(Catalog::in_memory()),
    }
}

fn serve(config_path: &Path, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let catalog = open_catalog(&config)?;
    let server = HttpServer::with_config(catalog, config);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        load_config(config_path)?
    } else {
        let config = ServerConfig {
            data_dir: Some(PathBuf::from("./biblio-data")),
            ..ServerConfig::default()
        };
        let bytes = serde_json::to_vec_pretty(&config)
            .map_err(|e| CliError::Config(e.to_string()))?;
        fs::write(config_path, bytes)?;
        println!("Wrote {}", config_path.display());
        config
    };

    if let Some(dir) = &config.data_dir {
        fs::create_dir_all(dir)?;
        let snapshot = dir.join(SNAPSHOT_FILE);
        if !snapshot.exists() {
            let catalog = Catalog::open(&snapshot)?;
            catalog.begin().commit()?;
            println!("Seeded empty catalog at {}", snapshot.display());
        }
    }

    println!("Ready. Start the server with: biblio serve --config {}", config_path.display());
    Ok(())
}
