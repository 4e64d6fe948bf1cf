//! Payload validator
//!
//! Validation semantics:
//! - Create: all required fields present, all declared fields type-check
//! - Patch: any subset of declared fields, types still enforced
//! - Undeclared fields are ignored
//! - Null is never a valid field value
//!
//! Validation is deterministic and does not mutate the payload.

use chrono::NaiveDate;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldType, PayloadSchema};

/// Wire format for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

impl PayloadSchema {
    /// Validates a POST payload: required fields enforced.
    pub fn validate_create(&self, payload: &Value) -> SchemaResult<()> {
        let obj = payload.as_object().ok_or(SchemaError::NotAnObject)?;

        for (name, def) in self.fields {
            match obj.get(*name) {
                Some(value) => validate_value(name, def.field_type, value)?,
                None if def.required => return Err(SchemaError::MissingField(name)),
                None => {}
            }
        }
        Ok(())
    }

    /// Validates a PUT payload: any subset of declared fields.
    pub fn validate_patch(&self, payload: &Value) -> SchemaResult<()> {
        let obj = payload.as_object().ok_or(SchemaError::NotAnObject)?;

        for (name, def) in self.fields {
            if let Some(value) = obj.get(*name) {
                validate_value(name, def.field_type, value)?;
            }
        }
        Ok(())
    }
}

fn validate_value(field: &'static str, expected: FieldType, value: &Value) -> SchemaResult<()> {
    let mismatch = || SchemaError::TypeMismatch {
        field,
        expected: expected.name(),
    };

    match expected {
        FieldType::String => {
            value.as_str().ok_or_else(mismatch)?;
        }
        FieldType::Float => {
            let number = value.as_f64().ok_or_else(mismatch)?;
            if number < 0.0 {
                return Err(SchemaError::NegativeNumber { field });
            }
        }
        FieldType::Date => {
            let text = value.as_str().ok_or_else(mismatch)?;
            NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
                SchemaError::MalformedDate {
                    field,
                    value: text.to_string(),
                }
            })?;
        }
        FieldType::StringList => {
            let items = value.as_array().ok_or_else(mismatch)?;
            for item in items {
                if !item.is_string() {
                    return Err(mismatch());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::types::{AUTHOR, BOOK, CLIENT};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_book_payload_passes() {
        let payload = json!({
            "title": "Dune",
            "premiere": "1965-08-01",
            "price": 9.99,
            "authors": ["Frank Herbert"],
            "client": "John Smith"
        });
        assert!(BOOK.validate_create(&payload).is_ok());
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        assert!(BOOK.validate_create(&json!({"title": "Dune"})).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let err = BOOK.validate_create(&json!({"price": 9.99})).unwrap_err();
        assert_eq!(err, SchemaError::MissingField("title"));
    }

    #[test]
    fn test_type_mismatch_fails() {
        let err = BOOK
            .validate_create(&json!({"title": 123}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { field: "title", .. }));
    }

    #[test]
    fn test_malformed_date_fails() {
        let payload = json!({"title": "Dune", "premiere": "08/01/1965"});
        let err = BOOK.validate_create(&payload).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedDate { field: "premiere", .. }));
    }

    #[test]
    fn test_negative_price_fails() {
        let payload = json!({"title": "Dune", "price": -1.0});
        let err = BOOK.validate_create(&payload).unwrap_err();
        assert_eq!(err, SchemaError::NegativeNumber { field: "price" });
    }

    #[test]
    fn test_integer_price_accepted() {
        assert!(BOOK
            .validate_create(&json!({"title": "Dune", "price": 10}))
            .is_ok());
    }

    #[test]
    fn test_authors_must_be_string_list() {
        let payload = json!({"title": "Dune", "authors": ["Frank Herbert", 42]});
        assert!(BOOK.validate_create(&payload).is_err());

        let payload = json!({"title": "Dune", "authors": "Frank Herbert"});
        assert!(BOOK.validate_create(&payload).is_err());
    }

    #[test]
    fn test_null_value_rejected() {
        let payload = json!({"title": "Dune", "premiere": null});
        assert!(BOOK.validate_create(&payload).is_err());
    }

    #[test]
    fn test_undeclared_fields_ignored() {
        let payload = json!({"title": "Dune", "isbn": "978-0441013593"});
        assert!(BOOK.validate_create(&payload).is_ok());
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert_eq!(
            BOOK.validate_create(&json!([1, 2, 3])).unwrap_err(),
            SchemaError::NotAnObject
        );
    }

    #[test]
    fn test_patch_allows_any_subset() {
        assert!(BOOK.validate_patch(&json!({})).is_ok());
        assert!(BOOK.validate_patch(&json!({"price": 4.5})).is_ok());
        assert!(AUTHOR.validate_patch(&json!({"birth": "1920-01-02"})).is_ok());
    }

    #[test]
    fn test_patch_still_enforces_types() {
        assert!(BOOK.validate_patch(&json!({"price": "cheap"})).is_err());
        assert!(AUTHOR.validate_patch(&json!({"birth": "yesterday"})).is_err());
    }

    #[test]
    fn test_author_requires_both_names() {
        let err = AUTHOR
            .validate_create(&json!({"first_name": "Jane"}))
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("last_name"));

        let err = CLIENT
            .validate_create(&json!({"last_name": "Doe"}))
            .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("first_name"));
    }
}
