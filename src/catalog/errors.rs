//! Catalog error types

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by the catalog store and its snapshot file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("snapshot i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("snapshot checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("snapshot file is truncated")]
    Truncated,
}

/// Errors raised by the lookup/upsert helpers.
///
/// A malformed input is a hard parse failure, distinct from a lookup
/// miss: it fails even when creation was requested.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("name does not split into first and last: {0:?}")]
    MalformedName(String),

    #[error("title must be longer than one character: {0:?}")]
    MalformedTitle(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
