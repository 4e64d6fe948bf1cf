//! HTTP Server Configuration
//!
//! Configuration for the catalog server including bind address, CORS
//! origins and the optional data directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Data directory for the catalog snapshot; absent means in-memory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            data_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create a config bound to the given port on the default host.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// The bind address in `host:port` form.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert!(config.cors_origins.is_empty());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_with_port() {
        assert_eq!(ServerConfig::with_port(8080).socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_all_fields_defaulted_from_empty_json() {
        let config: ServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"port": 9000, "data_dir": "/tmp/biblio"}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/biblio")));
        assert_eq!(config.host, "0.0.0.0");
    }
}
