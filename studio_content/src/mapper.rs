//! Maps tagged wire documents to plain [`ContentValue`] trees.
//!
//! The mapper does no I/O: callers fetch a [`WireDocument`] or
//! [`WireCollection`] through a [`crate::DocumentStore`] and hand it over.
//! A document the store reported as missing is represented as `None` and
//! maps to `Ok(None)`; that is the only empty outcome that is not an error.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::wire::{WireCollection, WireDocument, WireDouble, WireInteger, WireValue};
use crate::{ContentError, ContentMap, ContentResult, ContentValue};

/// A mapped document: its id plus untagged fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    id: String,
    fields: ContentMap,
}

impl Record {
    /// Create a record from an id and already-mapped fields.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: ContentMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Trailing path segment of the document name.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Mapped fields, without the id.
    #[must_use]
    pub const fn fields(&self) -> &ContentMap {
        &self.fields
    }

    /// Flatten into `{ id, ...fields }`.
    ///
    /// Fields are applied after the id, so a stored field literally named
    /// `id` takes precedence over the one derived from the document name.
    #[must_use]
    pub fn into_value(self) -> ContentValue {
        let mut map = ContentMap::new();
        map.insert("id".to_owned(), ContentValue::String(self.id));
        map.extend(self.fields);
        ContentValue::Map(map)
    }
}

impl From<Record> for ContentValue {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Map a single-record fetch, where `None` means the store had no document.
///
/// # Errors
///
/// Returns [`ContentError::InvalidValue`] when a tagged value cannot be
/// coerced to its type.
///
/// # Examples
///
/// ```
/// use studio_content::map_record;
///
/// assert_eq!(map_record(None)?, None);
/// # Ok::<_, std::sync::Arc<studio_content::ContentError>>(())
/// ```
pub fn map_record(document: Option<WireDocument>) -> ContentResult<Option<Record>> {
    document.as_ref().map(map_document).transpose()
}

/// Map one present document.
///
/// # Errors
///
/// Returns [`ContentError::InvalidValue`] when a tagged value cannot be
/// coerced to its type.
pub fn map_document(document: &WireDocument) -> ContentResult<Record> {
    let fields = map_fields(&document.fields, "")?;
    Ok(Record::new(document.id(), fields))
}

/// Map every document of a collection, preserving store order.
///
/// A collection without documents maps to an empty vector.
///
/// # Errors
///
/// Returns the first [`ContentError::InvalidValue`] encountered.
pub fn map_collection(collection: WireCollection) -> ContentResult<Vec<Record>> {
    collection.documents.iter().map(map_document).collect()
}

fn map_fields(fields: &BTreeMap<String, WireValue>, parent: &str) -> ContentResult<ContentMap> {
    fields
        .iter()
        .map(|(key, value)| {
            let path = if parent.is_empty() {
                key.clone()
            } else {
                format!("{parent}.{key}")
            };
            map_value(value, &path).map(|mapped| (key.clone(), mapped))
        })
        .collect()
}

fn map_value(value: &WireValue, path: &str) -> ContentResult<ContentValue> {
    Ok(match value {
        WireValue::StringValue(text) => ContentValue::String(text.clone()),
        WireValue::IntegerValue(integer) => ContentValue::Integer(parse_integer(integer, path)?),
        WireValue::DoubleValue(double) => ContentValue::Double(parse_double(double, path)?),
        WireValue::BooleanValue(flag) => ContentValue::Bool(*flag),
        WireValue::TimestampValue(text) => ContentValue::Timestamp(parse_timestamp(text, path)?),
        WireValue::ArrayValue(array) => ContentValue::Array(
            array
                .values
                .iter()
                .enumerate()
                .map(|(index, element)| map_value(element, &format!("{path}[{index}]")))
                .collect::<ContentResult<Vec<_>>>()?,
        ),
        WireValue::MapValue(map) => ContentValue::Map(map_fields(&map.fields, path)?),
        WireValue::NullValue(()) => ContentValue::Null,
    })
}

fn parse_integer(integer: &WireInteger, path: &str) -> ContentResult<i64> {
    match integer {
        WireInteger::Number(value) => Ok(*value),
        WireInteger::Text(text) => text.trim().parse::<i64>().map_err(|err| {
            ContentError::invalid_value(path, format!("'{text}' is not an integer: {err}")).shared()
        }),
    }
}

fn parse_double(double: &WireDouble, path: &str) -> ContentResult<f64> {
    match double {
        WireDouble::Number(value) => Ok(*value),
        WireDouble::Text(text) => match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other.parse::<f64>().map_err(|err| {
                ContentError::invalid_value(path, format!("'{other}' is not a double: {err}"))
                    .shared()
            }),
        },
    }
}

fn parse_timestamp(text: &str, path: &str) -> ContentResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| {
            ContentError::invalid_value(path, format!("'{text}' is not an RFC 3339 timestamp: {err}"))
                .shared()
        })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn document(value: serde_json::Value) -> WireDocument {
        serde_json::from_value(value).expect("fixture is a valid wire document")
    }

    #[test]
    fn maps_the_four_field_round_trip() {
        let doc = document(json!({
            "name": "projects/p/databases/(default)/documents/content/heroContent",
            "fields": {
                "heroTitle": {"stringValue": "Creative Agency"},
                "slideCount": {"integerValue": "3"},
                "tags": {"arrayValue": {}},
                "social": {"mapValue": {"fields": {"twitter": {"stringValue": "#"}}}},
            }
        }));

        let record = map_document(&doc).expect("document maps");
        assert_eq!(record.id(), "heroContent");
        assert_eq!(record.fields().len(), 4);
        assert_eq!(
            record.into_value(),
            ContentValue::from(json!({
                "id": "heroContent",
                "heroTitle": "Creative Agency",
                "slideCount": 3,
                "tags": [],
                "social": {"twitter": "#"},
            }))
        );
    }

    #[test]
    fn maps_arrays_of_maps_recursively() {
        let doc = document(json!({
            "name": "projects/p/databases/(default)/documents/content/faqContent",
            "fields": {
                "items": {"arrayValue": {"values": [
                    {"mapValue": {"fields": {
                        "question": {"stringValue": "Why?"},
                        "order": {"integerValue": "1"},
                        "tags": {"arrayValue": {"values": [{"stringValue": "a"}]}},
                    }}},
                    {"arrayValue": {"values": [{"booleanValue": true}]}},
                ]}}
            }
        }));

        let value = map_document(&doc).expect("document maps").into_value();
        assert_eq!(
            value.get("items"),
            Some(&ContentValue::from(json!([
                {"question": "Why?", "order": 1, "tags": ["a"]},
                [true],
            ])))
        );
    }

    #[test]
    fn parses_timestamps_to_utc() {
        let doc = document(json!({
            "name": "projects/p/documents/posts/launch",
            "fields": {"publishedAt": {"timestampValue": "2024-03-01T14:30:00+02:00"}}
        }));

        let record = map_document(&doc).expect("document maps");
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("valid date");
        assert_eq!(
            record.fields().get("publishedAt").and_then(ContentValue::as_timestamp),
            Some(expected)
        );
    }

    #[rstest]
    #[case(json!({"doubleValue": "NaN"}))]
    #[case(json!({"doubleValue": "Infinity"}))]
    fn accepts_non_finite_doubles(#[case] tagged: serde_json::Value) {
        let doc = document(json!({"name": "a/b", "fields": {"ratio": tagged}}));
        let record = map_document(&doc).expect("document maps");
        let ratio = record.fields().get("ratio").and_then(ContentValue::as_f64);
        assert!(ratio.is_some_and(|r| !r.is_finite()));
    }

    #[rstest]
    #[case(json!({"integerValue": "twelve"}), "count")]
    #[case(json!({"timestampValue": "yesterday"}), "count")]
    #[case(json!({"mapValue": {"fields": {"inner": {"integerValue": "x"}}}}), "count.inner")]
    #[case(json!({"arrayValue": {"values": [{"stringValue": "ok"}, {"doubleValue": "lots"}]}}), "count[1]")]
    fn reports_the_path_of_invalid_values(#[case] tagged: serde_json::Value, #[case] path: &str) {
        let doc = document(json!({"name": "a/b", "fields": {"count": tagged}}));
        let err = map_document(&doc).expect_err("value is invalid");
        match &*err {
            ContentError::InvalidValue { field, .. } => assert_eq!(field, path),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn stored_id_field_overrides_derived_id() {
        let doc = document(json!({
            "name": "projects/p/documents/services/xyz",
            "fields": {"id": {"stringValue": "web-design"}}
        }));
        let value = map_document(&doc).expect("document maps").into_value();
        assert_eq!(value.get("id"), Some(&ContentValue::from("web-design")));
    }

    #[test]
    fn not_found_maps_to_none() {
        assert_eq!(map_record(None).expect("absence is not an error"), None);
    }

    #[test]
    fn empty_collection_maps_to_empty_vec() {
        let records = map_collection(WireCollection::default()).expect("empty collection maps");
        assert!(records.is_empty());
    }
}
