//! Client HTTP routes
//!
//! A client owns books one-directionally: attaching a book sets the
//! book's `client_id`, and attaching it to another client steals it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::catalog::{ClientRow, RowId, Transaction};
use crate::schema::{self, coerce};

use super::author_routes::BookRef;
use super::error::{ApiError, Entity};
use super::resolve;
use super::response::{Added, Deleted, Modified};
use super::server::AppState;

/// A client as returned by `GET /clients` and `GET /clients/{id}`.
#[derive(Debug, Serialize)]
pub struct ClientBody {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub books: Vec<BookRef>,
}

fn client_body(txn: &Transaction<'_>, client: &ClientRow) -> ClientBody {
    let books = txn
        .client_books(client.id)
        .into_iter()
        .map(|book| BookRef {
            title: book.title.clone(),
            id: book.id,
        })
        .collect();

    ClientBody {
        id: client.id,
        first_name: client.first_name.clone(),
        last_name: client.last_name.clone(),
        books,
    }
}

/// Create the client routes.
pub fn client_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clients", get(list_clients_handler))
        .route("/clients", post(create_client_handler))
        .route("/clients", delete(delete_clients_handler))
        .route("/clients/{id}", get(get_client_handler))
        .route("/clients/{id}", put(update_client_handler))
        .route("/clients/{id}", delete(delete_client_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_clients_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ClientBody>> {
    let txn = state.catalog.begin();
    let clients = txn.clients().map(|client| client_body(&txn, client)).collect();
    Json(clients)
}

async fn create_client_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Added>), ApiError> {
    schema::CLIENT.validate_create(&payload)?;

    let first_name = coerce::string_field(&payload, "first_name")
        .ok_or_else(|| ApiError::Validation("'first_name' is a required property".into()))?;
    let last_name = coerce::string_field(&payload, "last_name")
        .ok_or_else(|| ApiError::Validation("'last_name' is a required property".into()))?;

    let mut txn = state.catalog.begin();
    if txn.client_by_name(&first_name, &last_name).is_some() {
        return Err(ApiError::Conflict(Entity::Client));
    }

    let book_ids = match coerce::string_list_field(&payload, "books") {
        Some(titles) => resolve::book_ids(&mut txn, &titles)?,
        None => Vec::new(),
    };

    let client_id = txn.insert_client(first_name.clone(), last_name.clone());
    for book_id in &book_ids {
        if let Some(book) = txn.book_mut(*book_id) {
            book.client_id = Some(client_id);
        }
    }
    txn.commit()?;

    info!(id = client_id, "client added");
    Ok((
        StatusCode::CREATED,
        Json(Added {
            added: format!("Client: {} {}", first_name, last_name),
        }),
    ))
}

async fn delete_clients_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let ids: Vec<RowId> = txn.clients().map(|client| client.id).collect();
    for id in &ids {
        txn.release_client_books(*id);
        txn.remove_client(*id);
    }
    txn.commit()?;

    info!(count = ids.len(), "all clients deleted");
    Ok(Json(Deleted {
        deleted: "all clients".to_string(),
    }))
}

async fn get_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<ClientBody>, ApiError> {
    let txn = state.catalog.begin();
    let client = txn.client(id).ok_or(ApiError::NotFound(Entity::Client))?;
    Ok(Json(client_body(&txn, client)))
}

async fn update_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
    Json(payload): Json<Value>,
) -> Result<Json<Modified>, ApiError> {
    schema::CLIENT.validate_patch(&payload)?;

    let mut txn = state.catalog.begin();
    let current = txn
        .client(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Client))?;

    let first_name =
        coerce::string_field(&payload, "first_name").unwrap_or_else(|| current.first_name.clone());
    let last_name =
        coerce::string_field(&payload, "last_name").unwrap_or_else(|| current.last_name.clone());

    if let Some(titles) = coerce::string_list_field(&payload, "books") {
        let book_ids = resolve::book_ids(&mut txn, &titles)?;
        // Replace-if-nonempty guard: an empty list leaves the set untouched.
        if !book_ids.is_empty() {
            txn.release_client_books(id);
            for book_id in book_ids {
                if let Some(book) = txn.book_mut(book_id) {
                    book.client_id = Some(id);
                }
            }
        }
    }

    if let Some(client) = txn.client_mut(id) {
        client.first_name = first_name.clone();
        client.last_name = last_name.clone();
    }
    txn.commit()?;

    Ok(Json(Modified {
        modified: format!("{} {}", first_name, last_name),
    }))
}

async fn delete_client_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<RowId>,
) -> Result<Json<Deleted>, ApiError> {
    let mut txn = state.catalog.begin();
    let client = txn
        .client(id)
        .cloned()
        .ok_or(ApiError::NotFound(Entity::Client))?;

    txn.release_client_books(id);
    txn.remove_client(id);
    txn.commit()?;

    info!(id, "client deleted");
    Ok(Json(Deleted {
        deleted: format!("{} {}", client.first_name, client.last_name),
    }))
}
