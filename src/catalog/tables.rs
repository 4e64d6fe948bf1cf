//! Relational tables for the catalog
//!
//! Three row tables keyed by surrogate id plus one insertion-ordered
//! many-to-many join table. The join table carries no uniqueness
//! constraint: linking the same author to the same book twice produces
//! two link rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Surrogate key type shared by all tables.
pub type RowId = u64;

/// A book row. `client_id` is a nullable foreign key to the client
/// currently holding the copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRow {
    pub id: RowId,
    pub title: String,
    pub premiere: Option<NaiveDate>,
    pub price: Option<f64>,
    pub client_id: Option<RowId>,
}

/// An author row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub birth: Option<NaiveDate>,
    pub death: Option<NaiveDate>,
}

/// A client row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
}

/// One book-to-author link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAuthorLink {
    pub book_id: RowId,
    pub author_id: RowId,
}

/// The full relational state of the catalog.
///
/// Surrogate ids are sequential per table, starting at 1, and are never
/// reused after a delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    books: BTreeMap<RowId, BookRow>,
    authors: BTreeMap<RowId, AuthorRow>,
    clients: BTreeMap<RowId, ClientRow>,
    book_authors: Vec<BookAuthorLink>,
    last_book_id: RowId,
    last_author_id: RowId,
    last_client_id: RowId,
}

impl Tables {
    // ==================
    // Books
    // ==================

    /// Inserts a book row and returns its id.
    pub fn insert_book(
        &mut self,
        title: impl Into<String>,
        premiere: Option<NaiveDate>,
        price: Option<f64>,
        client_id: Option<RowId>,
    ) -> RowId {
        self.last_book_id += 1;
        let id = self.last_book_id;
        self.books.insert(
            id,
            BookRow {
                id,
                title: title.into(),
                premiere,
                price,
                client_id,
            },
        );
        id
    }

    pub fn book(&self, id: RowId) -> Option<&BookRow> {
        self.books.get(&id)
    }

    pub fn book_mut(&mut self, id: RowId) -> Option<&mut BookRow> {
        self.books.get_mut(&id)
    }

    /// All books in id order.
    pub fn books(&self) -> impl Iterator<Item = &BookRow> {
        self.books.values()
    }

    /// Exact-equality title match.
    pub fn book_by_title(&self, title: &str) -> Option<&BookRow> {
        self.books.values().find(|b| b.title == title)
    }

    /// Removes a book row. Does not touch the join table; callers detach
    /// associations first.
    pub fn remove_book(&mut self, id: RowId) -> Option<BookRow> {
        self.books.remove(&id)
    }

    // ==================
    // Authors
    // ==================

    /// Inserts an author row and returns its id.
    pub fn insert_author(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth: Option<NaiveDate>,
        death: Option<NaiveDate>,
    ) -> RowId {
        self.last_author_id += 1;
        let id = self.last_author_id;
        self.authors.insert(
            id,
            AuthorRow {
                id,
                first_name: first_name.into(),
                last_name: last_name.into(),
                birth,
                death,
            },
        );
        id
    }

    pub fn author(&self, id: RowId) -> Option<&AuthorRow> {
        self.authors.get(&id)
    }

    pub fn author_mut(&mut self, id: RowId) -> Option<&mut AuthorRow> {
        self.authors.get_mut(&id)
    }

    /// All authors in id order.
    pub fn authors(&self) -> impl Iterator<Item = &AuthorRow> {
        self.authors.values()
    }

    /// Natural-key match on the ordered (first, last) pair.
    pub fn author_by_name(&self, first_name: &str, last_name: &str) -> Option<&AuthorRow> {
        self.authors
            .values()
            .find(|a| a.first_name == first_name && a.last_name == last_name)
    }

    pub fn remove_author(&mut self, id: RowId) -> Option<AuthorRow> {
        self.authors.remove(&id)
    }

    // ==================
    // Clients
    // ==================

    /// Inserts a client row and returns its id.
    pub fn insert_client(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> RowId {
        self.last_client_id += 1;
        let id = self.last_client_id;
        self.clients.insert(
            id,
            ClientRow {
                id,
                first_name: first_name.into(),
                last_name: last_name.into(),
            },
        );
        id
    }

    pub fn client(&self, id: RowId) -> Option<&ClientRow> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: RowId) -> Option<&mut ClientRow> {
        self.clients.get_mut(&id)
    }

    /// All clients in id order.
    pub fn clients(&self) -> impl Iterator<Item = &ClientRow> {
        self.clients.values()
    }

    pub fn client_by_name(&self, first_name: &str, last_name: &str) -> Option<&ClientRow> {
        self.clients
            .values()
            .find(|c| c.first_name == first_name && c.last_name == last_name)
    }

    pub fn remove_client(&mut self, id: RowId) -> Option<ClientRow> {
        self.clients.remove(&id)
    }

    // ==================
    // Book-author links
    // ==================

    /// Appends a link row. Duplicates are allowed.
    pub fn link_author(&mut self, book_id: RowId, author_id: RowId) {
        self.book_authors.push(BookAuthorLink { book_id, author_id });
    }

    /// Removes every link row referencing the book.
    pub fn clear_book_authors(&mut self, book_id: RowId) {
        self.book_authors.retain(|l| l.book_id != book_id);
    }

    /// Removes every link row referencing the author.
    pub fn clear_author_books(&mut self, author_id: RowId) {
        self.book_authors.retain(|l| l.author_id != author_id);
    }

    /// Materialized author rows for a book, in link-insertion order.
    /// Links whose author row has been removed are skipped.
    pub fn book_authors(&self, book_id: RowId) -> Vec<&AuthorRow> {
        self.book_authors
            .iter()
            .filter(|l| l.book_id == book_id)
            .filter_map(|l| self.authors.get(&l.author_id))
            .collect()
    }

    /// Materialized book rows for an author, in link-insertion order.
    pub fn author_books(&self, author_id: RowId) -> Vec<&BookRow> {
        self.book_authors
            .iter()
            .filter(|l| l.author_id == author_id)
            .filter_map(|l| self.books.get(&l.book_id))
            .collect()
    }

    /// Raw link rows, exposed so teardown can be verified.
    pub fn links(&self) -> &[BookAuthorLink] {
        &self.book_authors
    }

    // ==================
    // Client ownership
    // ==================

    /// Books owned by a client, in id order.
    pub fn client_books(&self, client_id: RowId) -> Vec<&BookRow> {
        self.books
            .values()
            .filter(|b| b.client_id == Some(client_id))
            .collect()
    }

    /// Nulls the foreign key on every book the client owns.
    pub fn release_client_books(&mut self, client_id: RowId) {
        for book in self.books.values_mut() {
            if book.client_id == Some(client_id) {
                book.client_id = None;
            }
        }
    }
}
