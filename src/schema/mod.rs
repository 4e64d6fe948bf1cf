//! Payload schemas and validation for biblio
//!
//! Declarative per-resource field tables, a validator that runs before
//! any handler body, and typed field-extraction helpers for partial
//! updates.

pub mod coerce;
mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{FieldDef, FieldType, PayloadSchema, AUTHOR, BOOK, CLIENT};
pub use validator::DATE_FORMAT;
