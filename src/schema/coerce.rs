//! Typed field extraction from validated payloads
//!
//! These helpers back the PUT partial-update rule: a present field is
//! extracted, an absent field yields `None` and the caller falls back to
//! the stored value. Date fields parse from `YYYY-MM-DD`; the stored
//! `NaiveDate` serializes back to the same string form, so the API never
//! returns a language-native date object.
//!
//! Callers run the payload through the validator first, so a present
//! field is already known to have the declared type.

use chrono::NaiveDate;
use serde_json::Value;

use super::validator::DATE_FORMAT;

/// Extracts a string field.
pub fn string_field(payload: &Value, name: &str) -> Option<String> {
    payload.get(name)?.as_str().map(str::to_string)
}

/// Extracts a float field.
pub fn float_field(payload: &Value, name: &str) -> Option<f64> {
    payload.get(name)?.as_f64()
}

/// Extracts and parses a `YYYY-MM-DD` date field.
pub fn date_field(payload: &Value, name: &str) -> Option<NaiveDate> {
    let text = payload.get(name)?.as_str()?;
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Extracts a list-of-strings field.
pub fn string_list_field(payload: &Value, name: &str) -> Option<Vec<String>> {
    let items = payload.get(name)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}
