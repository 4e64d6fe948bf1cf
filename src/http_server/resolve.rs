//! Glue between the catalog lookup helpers and API errors
//!
//! Handlers resolve display names with creation enabled; any parse
//! failure aborts the request with a 400 rather than silently dropping
//! the entry.

use crate::catalog::{lookup, RowId, Transaction};

use super::error::{ApiError, Entity};

/// Resolves a list of "First Last" author names to row ids.
pub(super) fn author_ids(
    txn: &mut Transaction<'_>,
    names: &[String],
) -> Result<Vec<RowId>, ApiError> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let resolution = lookup::resolve_author(txn, name, true)
            .map_err(|e| ApiError::from_lookup(e, Entity::Author))?;
        match resolution.id() {
            Some(id) => ids.push(id),
            None => return Err(ApiError::InvalidName(Entity::Author)),
        }
    }
    Ok(ids)
}

/// Resolves a list of book titles to row ids.
pub(super) fn book_ids(
    txn: &mut Transaction<'_>,
    titles: &[String],
) -> Result<Vec<RowId>, ApiError> {
    let mut ids = Vec::with_capacity(titles.len());
    for title in titles {
        let resolution = lookup::resolve_book(txn, title, true)
            .map_err(|e| ApiError::from_lookup(e, Entity::Book))?;
        match resolution.id() {
            Some(id) => ids.push(id),
            None => return Err(ApiError::InvalidName(Entity::Book)),
        }
    }
    Ok(ids)
}

/// Resolves a single "First Last" client name to a row id.
pub(super) fn client_id(txn: &mut Transaction<'_>, name: &str) -> Result<RowId, ApiError> {
    let resolution = lookup::resolve_client(txn, name, true)
        .map_err(|e| ApiError::from_lookup(e, Entity::Client))?;
    resolution
        .id()
        .ok_or(ApiError::InvalidName(Entity::Client))
}
