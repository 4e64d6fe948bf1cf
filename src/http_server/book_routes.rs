//! Book HTTP routes
//!
//! Collection-level (`GET`/`POST`/`DELETE /books`) and item-level
//! (`GET`/`PUT`/`DELETE /books/{id}`) operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::catalog::{BookRow, RowId, Transaction};
use crate::schema::{self, coerce};

use super::error::{ApiError, Entity};
use super::resolve;
use super::response::{Added, Deleted, Modified};
use super::server::AppState;

// ==================
// Response Types
// ==================

/// An author entry embedded in a book body.
#[derive(Debug, Serialize)]
pub struct AuthorRef {
    pub name: String,
    pub id: RowId,
}

/// A book as returned by `GET /books` and `GET /books/{id}`.
#[derive(Debug, Serialize)]
pub struct BookBody {
    pub id: RowId,
    pub title: String,
    pub premiere: Option<NaiveDate>,
    pub price: Option<f64>,
    pub authors: Vec<AuthorRef>,
    pub client_id: Option<RowId>,
}

fn book_body(txn: &Transaction<'_>, book: &BookRow) -> BookBody {
    let authors = txn
        .book_authors(book.id)
        .into_iter()
        .map(|author| AuthorRef {
            name: format!("{} {}", author.first_name, author.last_name),
            id: author.id,
        })
        .collect();

    BookBody {
        id: book.id,
        title: book.title.clone(),
        premiere: book.premiere,
        price: book.price,
        authors,
        client_id: book.client_id,
    }
}

// ==================
// Routes
// ==================

/// Create the book routes.
pub fn book_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler))
        .route("/books", post(create_book_handler))
        .route("/books", delete(delete_books_handler))
        .route("/books/{id}", get(get_book_handler))
        .route("/books/{id}", put(update_book_handler))
        .route("/books/{id}", delete(delete_book_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_books_handler(State(state): State<Arc<AppState>>) -> Json<Vec<BookBody>> {
    let txn = state.catalog.begin();
    let books = txn.books().map(|book| book_body(&txn, book)).collect();
    Json(books)
}

async fn create_book_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Added>), ApiError> {
    schema::BOOK.validate_create(&payload)?;

    let title = coerce::string_field(&payload, "title")
        .ok_or_else(|| ApiError::Validation("'title' is a required property".into()))?;
    let premiere = coerce::date_field(&payload, "premiere");
    let price = coerce::float_field(&payload, "price");

    let mut txn = state.catalog.begin();
    if txn.book_by_title(&title).is_some() {
        return Err(ApiError::Conflict(Entity::Book));
    }

    // Resolve relations before the row insert so a bad name aborts the
    // request without leaving a half-attached book behind.
    let author_ids = match coerce::string_list_field(&payload, "authors") {
        Some(names) => resolve::author_ids(&mut txn, &names)?,
        None => Vec::new(),
    };
    let client_id = match coerce::string_field(&payload, "client") {
        Some(name) => Some(resolve::client_id(&mut txn, &name)?),
        None => None,
    };

    let book_id = txn.insert_book(title.clone(), premiere, price, client_id);
    for author_id in &author_ids {
        txn.link_author(book_id, *author_id);
    }
    txn.commit()?;

    info!(%title, id = book_id, "book added");
    Ok((StatusCode::CREATED, Json(Added { added: title })))
}

async fn delete_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let ids: Vec<RowId> = txn.books().map(|book| book.id).collect();
    for id in &ids {
        txn.clear_book_authors(*id);
        txn.remove_book(*id);
    }
    txn.commit()?;

    info!(count = ids.len(), "all books deleted");
    Ok(Json(Deleted {
        deleted: "all books".to_string(),
    }))
}

async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<BookBody>, ApiError> {
    let txn = state.catalog.begin();
    let book = txn.book(id).ok_or(ApiError::NotFound(Entity::Book))?;
    Ok(Json(book_body(&txn, book)))
}

async fn update_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
    Json(payload): Json<Value>,
) -> Result<Json<Modified>, ApiError> {
    schema::BOOK.validate_patch(&payload)?;

    let mut txn = state.catalog.begin();
    let current = txn
        .book(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Book))?;

    let title = coerce::string_field(&payload, "title").unwrap_or_else(|| current.title.clone());
    let premiere = coerce::date_field(&payload, "premiere").or(current.premiere);
    let price = coerce::float_field(&payload, "price").or(current.price);

    if let Some(names) = coerce::string_list_field(&payload, "authors") {
        let author_ids = resolve::author_ids(&mut txn, &names)?;
        // Replace-if-nonempty guard: an empty list leaves the set untouched.
        if !author_ids.is_empty() {
            txn.clear_book_authors(id);
            for author_id in author_ids {
                txn.link_author(id, author_id);
            }
        }
    }

    let client_id = match coerce::string_field(&payload, "client") {
        Some(name) => Some(resolve::client_id(&mut txn, &name)?),
        None => current.client_id,
    };

    if let Some(book) = txn.book_mut(id) {
        book.title = title.clone();
        book.premiere = premiere;
        book.price = price;
        book.client_id = client_id;
    }
    txn.commit()?;

    Ok(Json(Modified { modified: title }))
}

async fn delete_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let book = txn
        .book(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Book))?;

    txn.clear_book_authors(id);
    txn.remove_book(id);
    txn.commit()?;

    info!(title = %book.title, id, "book deleted");
    Ok(Json(Deleted {
        deleted: book.title,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_book_body_formats_author_names() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();
        let book_id = txn.insert_book("Dune", None, Some(9.99), None);
        let author_id = txn.insert_author("Frank", "Herbert", None, None);
        txn.link_author(book_id, author_id);

        let book = txn.book(book_id).cloned().unwrap();
        let body = book_body(&txn, &book);
        assert_eq!(body.authors.len(), 1);
        assert_eq!(body.authors[0].name, "Frank Herbert");
        assert_eq!(body.authors[0].id, author_id);
        assert_eq!(body.client_id, None);
    }
}
