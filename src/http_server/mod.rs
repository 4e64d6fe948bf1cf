//! HTTP server for biblio
//!
//! One router per resource (books, authors, clients) plus a health
//! probe, all sharing a single catalog behind [`AppState`].

mod author_routes;
mod book_routes;
mod client_routes;
mod config;
mod error;
mod resolve;
mod response;
mod server;

pub use config::ServerConfig;
pub use error::{ApiError, Entity};
pub use server::{AppState, HttpServer};
