//! Shared mutation response bodies

use serde::Serialize;

/// Body of a successful POST.
#[derive(Debug, Serialize)]
pub struct Added {
    pub added: String,
}

/// Body of a successful PUT.
#[derive(Debug, Serialize)]
pub struct Modified {
    pub modified: String,
}

/// Body of a successful DELETE.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: String,
}
