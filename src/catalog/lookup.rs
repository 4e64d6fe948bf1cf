//! Lookup/upsert helpers (resolve-or-create by natural key)
//!
//! Each helper resolves a display string to a row id, creating the row
//! when `create` is set and no match exists. The result is an explicit
//! [`Resolution`], never a falsy value.
//!
//! Creation checkpoints the transaction immediately: an implicitly
//! created author, book or client stays in the catalog even if the
//! enclosing request later fails.

use tracing::debug;

use super::errors::LookupError;
use super::store::Transaction;
use super::tables::RowId;

/// Outcome of a resolve-or-create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An existing row matched the natural key.
    Found(RowId),
    /// No match existed and a row was created.
    Created(RowId),
    /// No match existed and creation was not requested.
    NotFound,
}

impl Resolution {
    /// The resolved row id, if any.
    pub fn id(self) -> Option<RowId> {
        match self {
            Resolution::Found(id) | Resolution::Created(id) => Some(id),
            Resolution::NotFound => None,
        }
    }
}

/// Splits a display name into the (first, last) pair.
///
/// The input is trimmed and split on the space character; the first two
/// tokens are used and any further tokens are dropped. Fewer than two
/// tokens is a hard parse failure, independent of the `create` flag.
/// Consecutive spaces yield an empty second token, which is accepted.
pub fn split_name(name: &str) -> Result<(&str, &str), LookupError> {
    let mut tokens = name.trim().split(' ');
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(LookupError::MalformedName(name.to_string())),
    }
}

/// Resolves an author by "First Last" display name.
pub fn resolve_author(
    txn: &mut Transaction<'_>,
    name: &str,
    create: bool,
) -> Result<Resolution, LookupError> {
    let (first, last) = split_name(name)?;

    if let Some(author) = txn.author_by_name(first, last) {
        return Ok(Resolution::Found(author.id));
    }
    if !create {
        return Ok(Resolution::NotFound);
    }

    let id = txn.insert_author(first, last, None, None);
    txn.checkpoint()?;
    debug!(first, last, id, "implicitly created author");
    Ok(Resolution::Created(id))
}

/// Resolves a book by exact title. Titles of one character or less are
/// a hard parse failure.
pub fn resolve_book(
    txn: &mut Transaction<'_>,
    title: &str,
    create: bool,
) -> Result<Resolution, LookupError> {
    if title.chars().count() <= 1 {
        return Err(LookupError::MalformedTitle(title.to_string()));
    }

    if let Some(book) = txn.book_by_title(title) {
        return Ok(Resolution::Found(book.id));
    }
    if !create {
        return Ok(Resolution::NotFound);
    }

    let id = txn.insert_book(title, None, None, None);
    txn.checkpoint()?;
    debug!(title, id, "implicitly created book");
    Ok(Resolution::Created(id))
}

/// Resolves a client by "First Last" display name.
pub fn resolve_client(
    txn: &mut Transaction<'_>,
    name: &str,
    create: bool,
) -> Result<Resolution, LookupError> {
    let (first, last) = split_name(name)?;

    if let Some(client) = txn.client_by_name(first, last) {
        return Ok(Resolution::Found(client.id));
    }
    if !create {
        return Ok(Resolution::NotFound);
    }

    let id = txn.insert_client(first, last);
    txn.checkpoint()?;
    debug!(first, last, id, "implicitly created client");
    Ok(Resolution::Created(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_split_name_two_tokens() {
        assert_eq!(split_name("Jane Doe").unwrap(), ("Jane", "Doe"));
    }

    #[test]
    fn test_split_name_trims_and_drops_extra_tokens() {
        assert_eq!(
            split_name("  John Ronald Reuel Tolkien ").unwrap(),
            ("John", "Ronald")
        );
    }

    #[test]
    fn test_split_name_consecutive_spaces_keep_empty_token() {
        assert_eq!(split_name("John  Smith").unwrap(), ("John", ""));
    }

    #[test]
    fn test_split_name_single_token_fails() {
        assert!(matches!(
            split_name("Cher"),
            Err(LookupError::MalformedName(_))
        ));
        assert!(matches!(split_name(""), Err(LookupError::MalformedName(_))));
    }

    #[test]
    fn test_resolve_author_creates_then_finds() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();

        let first = resolve_author(&mut txn, "Jane Doe", true).unwrap();
        assert!(matches!(first, Resolution::Created(1)));

        let second = resolve_author(&mut txn, "Jane Doe", true).unwrap();
        assert_eq!(second, Resolution::Found(1));
    }

    #[test]
    fn test_resolve_author_without_create_reports_not_found() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();

        let res = resolve_author(&mut txn, "Jane Doe", false).unwrap();
        assert_eq!(res, Resolution::NotFound);
        assert!(txn.author_by_name("Jane", "Doe").is_none());
    }

    #[test]
    fn test_malformed_name_fails_even_with_create() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();

        assert!(matches!(
            resolve_author(&mut txn, "Cher", true),
            Err(LookupError::MalformedName(_))
        ));
        assert_eq!(txn.authors().count(), 0);
    }

    #[test]
    fn test_resolve_book_rejects_short_title() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();

        assert!(matches!(
            resolve_book(&mut txn, "X", true),
            Err(LookupError::MalformedTitle(_))
        ));
        assert!(matches!(
            resolve_book(&mut txn, "", true),
            Err(LookupError::MalformedTitle(_))
        ));
        assert!(matches!(
            resolve_book(&mut txn, "It", true),
            Ok(Resolution::Created(_))
        ));
    }

    #[test]
    fn test_creation_survives_rollback_of_enclosing_request() {
        let catalog = Catalog::in_memory();

        {
            let mut txn = catalog.begin();
            resolve_author(&mut txn, "Jane Doe", true).unwrap();
            txn.insert_book("Dune", None, None, None);
            // request fails: dropped without commit
        }

        let txn = catalog.begin();
        assert!(txn.author_by_name("Jane", "Doe").is_some());
        assert!(txn.book_by_title("Dune").is_none());
    }

    #[test]
    fn test_resolve_client_roundtrip() {
        let catalog = Catalog::in_memory();
        let mut txn = catalog.begin();

        let created = resolve_client(&mut txn, "John Smith", true).unwrap();
        assert!(matches!(created, Resolution::Created(_)));
        assert_eq!(
            resolve_client(&mut txn, "John Smith", false).unwrap(),
            Resolution::Found(created.id().unwrap())
        );
    }
}
