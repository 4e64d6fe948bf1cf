//! Catalog subsystem for biblio
//!
//! The catalog holds the canonical relational state: three row tables
//! (books, authors, clients) plus the book-author join table, accessed
//! through an explicit per-request transaction scope.
//!
//! # Design principles
//!
//! - One transaction per handler invocation; commit or rollback on every
//!   exit path
//! - Lookup helpers checkpoint immediately on creation, so implicitly
//!   created rows survive a later failure of the parent insert
//! - Relationship reads return materialized, ordered sequences
//! - Snapshot file is checksum-verified on every load

mod errors;
pub mod lookup;
mod snapshot;
mod store;
mod tables;

pub use errors::{CatalogError, CatalogResult, LookupError};
pub use lookup::{resolve_author, resolve_book, resolve_client, Resolution};
pub use store::{Catalog, Transaction};
pub use tables::{AuthorRow, BookAuthorLink, BookRow, ClientRow, RowId, Tables};
