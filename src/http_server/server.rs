//! HTTP Server
//!
//! Combines the per-resource routers with the health probe, applies
//! CORS and request tracing, binds and serves.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::Catalog;

use super::author_routes::author_routes;
use super::book_routes::book_routes;
use super::client_routes::client_routes;
use super::config::ServerConfig;

/// State shared across all resource handlers.
pub struct AppState {
    pub catalog: Catalog,
}

/// HTTP server for the catalog API.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given catalog with default configuration.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, ServerConfig::default())
    }

    /// Create a server with custom configuration.
    pub fn with_config(catalog: Catalog, config: ServerConfig) -> Self {
        let router = Self::build_router(catalog, &config);
        Self { config, router }
    }

    /// Build the combined router with all endpoints.
    fn build_router(catalog: Catalog, config: &ServerConfig) -> Router {
        let state = Arc::new(AppState { catalog });

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(book_routes(state.clone()))
            .merge(author_routes(state.clone()))
            .merge(client_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// The configured bind address.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router (for testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "biblio catalog server listening");
        axum::serve(listener, self.router).await
    }
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(Catalog::in_memory());
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = ServerConfig::with_port(8080);
        let server = HttpServer::with_config(Catalog::in_memory(), config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(Catalog::in_memory());
        let _router = server.router();
    }

    #[test]
    fn test_router_builds_with_cors_origins() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..ServerConfig::default()
        };
        let server = HttpServer::with_config(Catalog::in_memory(), config);
        let _router = server.router();
    }
}
