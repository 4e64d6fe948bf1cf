//! HTTP error responses
//!
//! One error type for the whole API surface, converted to a JSON body
//! and status code at the axum boundary. The 404 and 409 body shapes are
//! part of the observable contract and are preserved verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::catalog::{CatalogError, LookupError};
use crate::schema::SchemaError;

/// The entity a handler was operating on, used to phrase error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Author,
    Client,
}

impl Entity {
    pub fn name(self) -> &'static str {
        match self {
            Entity::Book => "Book",
            Entity::Author => "Author",
            Entity::Client => "Client",
        }
    }

    fn name_lower(self) -> &'static str {
        match self {
            Entity::Book => "book",
            Entity::Author => "author",
            Entity::Client => "client",
        }
    }
}

/// API error taxonomy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Id lookup miss.
    #[error("{} is not find", .0.name())]
    NotFound(Entity),

    /// Natural-key duplicate caught by the application-level pre-check.
    #[error("The {} is already in database", .0.name_lower())]
    Conflict(Entity),

    /// A name or title that failed the lookup parse rules.
    #[error("{}'s name is incorrect", .0.name())]
    InvalidName(Entity),

    /// Payload failed schema validation.
    #[error("{0}")]
    Validation(String),

    /// Snapshot persistence failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a lookup failure onto the entity the handler was resolving.
    pub fn from_lookup(err: LookupError, entity: Entity) -> Self {
        match err {
            LookupError::MalformedName(_) | LookupError::MalformedTitle(_) => {
                ApiError::InvalidName(entity)
            }
            LookupError::Catalog(e) => ApiError::Internal(e.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidName(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::NotFound(entity) => {
                json!({ "Error": format!("{} is not find", entity.name()) })
            }
            ApiError::Conflict(entity) => json!({
                "Error 409": format!("The {} is already in database", entity.name_lower())
            }),
            ApiError::InvalidName(Entity::Book) => {
                json!({ "Error 400": "Book's title is incorrect" })
            }
            ApiError::InvalidName(entity) => json!({
                "Error 400": format!("{}'s name is incorrect", entity.name())
            }),
            ApiError::Validation(message) => json!({ "error": message, "code": 400 }),
            ApiError::Internal(message) => json!({ "error": message, "code": 500 }),
        };
        (status, Json(body)).into_response()
    }
}
