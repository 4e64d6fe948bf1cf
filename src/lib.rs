//! biblio - a small self-hostable bookstore catalog REST API
//!
//! Three related entities (Book, Author, Client) with CRUD endpoints and
//! implicit relationship creation: posting a book with unknown author or
//! client names creates those rows on the fly.

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod schema;
