//! Builders for tagged wire values and documents.
//!
//! ```
//! use studio_content_test_helpers::wire;
//!
//! let doc = wire::document(
//!     "projects/homepage/abc123",
//!     [("title", wire::string("Site"))],
//! );
//! assert_eq!(doc.id(), "abc123");
//! ```

use serde_json::{Map, Value, json};
use studio_content::wire::WireDocument;

/// `{"stringValue": text}`.
#[must_use]
pub fn string(text: &str) -> Value {
    json!({ "stringValue": text })
}

/// `{"integerValue": "<n>"}`, using the REST API's decimal-text encoding.
#[must_use]
pub fn integer(value: i64) -> Value {
    json!({ "integerValue": value.to_string() })
}

/// `{"doubleValue": n}`.
#[must_use]
pub fn double(value: f64) -> Value {
    json!({ "doubleValue": value })
}

/// `{"booleanValue": flag}`.
#[must_use]
pub fn boolean(flag: bool) -> Value {
    json!({ "booleanValue": flag })
}

/// `{"timestampValue": text}`.
#[must_use]
pub fn timestamp(text: &str) -> Value {
    json!({ "timestampValue": text })
}

/// `{"nullValue": null}`.
#[must_use]
pub fn null() -> Value {
    json!({ "nullValue": null })
}

/// `{"arrayValue": {"values": [...]}}`; an empty iterator yields
/// `{"arrayValue": {}}` as the store does.
#[must_use]
pub fn array<I: IntoIterator<Item = Value>>(values: I) -> Value {
    let values: Vec<Value> = values.into_iter().collect();
    if values.is_empty() {
        json!({ "arrayValue": {} })
    } else {
        json!({ "arrayValue": { "values": values } })
    }
}

/// `{"mapValue": {"fields": {...}}}`.
#[must_use]
pub fn map<'a, I: IntoIterator<Item = (&'a str, Value)>>(fields: I) -> Value {
    json!({ "mapValue": { "fields": field_map(fields) } })
}

/// JSON body of a document named `name`.
#[must_use]
pub fn document_json<'a, I: IntoIterator<Item = (&'a str, Value)>>(name: &str, fields: I) -> Value {
    json!({ "name": name, "fields": field_map(fields) })
}

/// A parsed document named `name`.
///
/// # Panics
///
/// Panics when a field is not a valid tagged value; builders in this module
/// always produce valid ones.
#[must_use]
pub fn document<'a, I: IntoIterator<Item = (&'a str, Value)>>(name: &str, fields: I) -> WireDocument {
    serde_json::from_value(document_json(name, fields)).expect("builders produce valid documents")
}

fn field_map<'a, I: IntoIterator<Item = (&'a str, Value)>>(fields: I) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}
