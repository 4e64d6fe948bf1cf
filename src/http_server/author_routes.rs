//! Author HTTP routes

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

use crate::catalog::{AuthorRow, RowId, Transaction};
use crate::schema::{self, coerce, DATE_FORMAT};

use super::error::{ApiError, Entity};
use super::resolve;
use super::response::{Added, Deleted, Modified};
use super::server::AppState;

// ==================
// Response Types
// ==================

/// A book entry embedded in an author or client body.
#[derive(Debug, Serialize)]
pub struct BookRef {
    pub title: String,
    pub id: RowId,
}

/// An author as returned by `GET /authors` and `GET /authors/{id}`.
#[derive(Debug, Serialize)]
pub struct AuthorBody {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub birth: Option<NaiveDate>,
    pub death: Option<NaiveDate>,
    pub books: Vec<BookRef>,
}

fn author_body(txn: &Transaction<'_>, author: &AuthorRow) -> AuthorBody {
    let books = txn
        .author_books(author.id)
        .into_iter()
        .map(|book| BookRef {
            title: book.title.clone(),
            id: book.id,
        })
        .collect();

    AuthorBody {
        id: author.id,
        first_name: author.first_name.clone(),
        last_name: author.last_name.clone(),
        birth: author.birth,
        death: author.death,
        books,
    }
}

/// Display string used in the POST success body, e.g.
/// `Author: Jane Doe (1970-05-01 - 2020-01-01)`.
fn author_display(author: &AuthorRow) -> String {
    format!(
        "Author: {} {} ({} - {})",
        author.first_name,
        author.last_name,
        format_date(author.birth),
        format_date(author.death)
    )
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => "unknown".to_string(),
    }
}

// ==================
// Routes
// ==================

/// Create the author routes.
pub fn author_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/authors", get(list_authors_handler))
        .route("/authors", post(create_author_handler))
        .route("/authors", delete(delete_authors_handler))
        .route("/authors/{id}", get(get_author_handler))
        .route("/authors/{id}", put(update_author_handler))
        .route("/authors/{id}", delete(delete_author_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_authors_handler(State(state): State<Arc<AppState>>) -> Json<Vec<AuthorBody>> {
    let txn = state.catalog.begin();
    let authors = txn.authors().map(|author| author_body(&txn, author)).collect();
    Json(authors)
}

async fn create_author_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Added>), ApiError> {
    schema::AUTHOR.validate_create(&payload)?;

    let first_name = coerce::string_field(&payload, "first_name")
        .ok_or_else(|| ApiError::Validation("'first_name' is a required property".into()))?;
    let last_name = coerce::string_field(&payload, "last_name")
        .ok_or_else(|| ApiError::Validation("'last_name' is a required property".into()))?;
    let birth = coerce::date_field(&payload, "birth");
    let death = coerce::date_field(&payload, "death");

    let mut txn = state.catalog.begin();
    if txn.author_by_name(&first_name, &last_name).is_some() {
        return Err(ApiError::Conflict(Entity::Author));
    }

    let book_ids = match coerce::string_list_field(&payload, "books") {
        Some(titles) => resolve::book_ids(&mut txn, &titles)?,
        None => Vec::new(),
    };

    let author_id = txn.insert_author(first_name, last_name, birth, death);
    for book_id in &book_ids {
        txn.link_author(*book_id, author_id);
    }

    let added = txn
        .author(author_id)
        .map(author_display)
        .unwrap_or_default();
    txn.commit()?;

    info!(id = author_id, "author added");
    Ok((StatusCode::CREATED, Json(Added { added })))
}

async fn delete_authors_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let ids: Vec<RowId> = txn.authors().map(|author| author.id).collect();
    for id in &ids {
        txn.clear_author_books(*id);
        txn.remove_author(*id);
    }
    txn.commit()?;

    info!(count = ids.len(), "all authors deleted");
    Ok(Json(Deleted {
        deleted: "all authors".to_string(),
    }))
}

async fn get_author_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<AuthorBody>, ApiError> {
    let txn = state.catalog.begin();
    let author = txn.author(id).ok_or(ApiError::NotFound(Entity::Author))?;
    Ok(Json(author_body(&txn, author)))
}

async fn update_author_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
    Json(payload): Json<Value>,
) -> Result<Json<Modified>, ApiError> {
    schema::AUTHOR.validate_patch(&payload)?;

    let mut txn = state.catalog.begin();
    let current = txn
        .author(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Author))?;

    let first_name =
        coerce::string_field(&payload, "first_name").unwrap_or_else(|| current.first_name.clone());
    let last_name =
        coerce::string_field(&payload, "last_name").unwrap_or_else(|| current.last_name.clone());
    let birth = coerce::date_field(&payload, "birth").or(current.birth);
    let death = coerce::date_field(&payload, "death").or(current.death);

    if let Some(titles) = coerce::string_list_field(&payload, "books") {
        let book_ids = resolve::book_ids(&mut txn, &titles)?;
        // Replace-if-nonempty guard: an empty list leaves the set untouched.
        if !book_ids.is_empty() {
            txn.clear_author_books(id);
            for book_id in book_ids {
                txn.link_author(book_id, id);
            }
        }
    }

    if let Some(author) = txn.author_mut(id) {
        author.first_name = first_name.clone();
        author.last_name = last_name.clone();
        author.birth = birth;
        author.death = death;
    }
    txn.commit()?;

    Ok(Json(Modified {
        modified: format!("{} {}", first_name, last_name),
    }))
}

async fn delete_author_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let author = txn
        .author(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Author))?;

    txn.clear_author_books(id);
    txn.remove_author(id);
    txn.commit()?;

    info!(id, "author deleted");
    Ok(Json(Deleted {
        deleted: format!("{} {}", author.first_name, author.last_name),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_display_with_dates() {
        let author = AuthorRow {
            id: 1,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            birth: NaiveDate::from_ymd_opt(1970, 5, 1),
            death: NaiveDate::from_ymd_opt(2020, 1, 1),
        };
        assert_eq!(
            author_display(&author),
            "Author: Jane Doe (1970-05-01 - 2020-01-01)"
        );
    }

    #[test]
    fn test_author_display_without_dates() {
        let author = AuthorRow {
            id: 1,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            birth: None,
            death: None,
        };
        assert_eq!(author_display(&author), "Author: Jane Doe (unknown - unknown)");
    }
}
