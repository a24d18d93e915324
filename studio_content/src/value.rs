//! Plain content values produced by the mapper and consumed by the merge.
//!
//! [`ContentValue`] is the untagged counterpart of the store's wire format:
//! one variant per wire tag, with timestamps already parsed. Values convert
//! to and from [`serde_json::Value`] so Default Records can be written with
//! `json!` and resolved records can be handed to serde-based presentation
//! code.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::{ContentResult, ContentResultExt};

/// Ordered map of field name to value.
pub type ContentMap = BTreeMap<String, ContentValue>;

/// A plain, untagged content value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentValue {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean, including explicit `false`.
    Bool(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Double(f64),
    /// UTF-8 text.
    String(String),
    /// Point in time, normalised to UTC.
    Timestamp(DateTime<Utc>),
    /// Ordered sequence of values.
    Array(Vec<ContentValue>),
    /// Nested plain object.
    Map(ContentMap),
}

impl ContentValue {
    /// Returns an empty map value.
    #[must_use]
    pub const fn empty_map() -> Self {
        Self::Map(ContentMap::new())
    }

    /// Returns `true` for plain objects, the only values the merge recurses into.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for [`ContentValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the inner map, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ContentMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the inner sequence, if any.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Borrow the inner text, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the inner integer, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the inner float, if any.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the inner boolean, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the inner timestamp, if any.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Look up `key` when `self` is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Convert into a JSON value.
    ///
    /// Timestamps become RFC 3339 strings and non-finite doubles become
    /// `null`, as JSON cannot represent them.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Integer(value) => Value::Number(Number::from(*value)),
            Self::Double(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::String(text) => Value::String(text.clone()),
            Self::Timestamp(at) => Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Array(values) => Value::Array(values.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Value> for ContentValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .or_else(|| number.as_f64().map(Self::Double))
                .unwrap_or(Self::Null),
            Value::String(text) => Self::String(text),
            Value::Array(values) => Self::Array(values.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&ContentValue> for Value {
    fn from(value: &ContentValue) -> Self {
        value.to_json()
    }
}

impl From<ContentValue> for Value {
    fn from(value: ContentValue) -> Self {
        value.to_json()
    }
}

impl From<&str> for ContentValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for ContentValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for ContentValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for ContentValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ContentValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<DateTime<Utc>> for ContentValue {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp(at)
    }
}

impl From<Vec<ContentValue>> for ContentValue {
    fn from(values: Vec<Self>) -> Self {
        Self::Array(values)
    }
}

impl From<ContentMap> for ContentValue {
    fn from(map: ContentMap) -> Self {
        Self::Map(map)
    }
}

/// Deserialise a [`ContentValue`] into `T`.
///
/// # Errors
///
/// Returns [`crate::ContentError::Decode`] when the value does not fit `T`.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use studio_content::{ContentValue, from_value};
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// #[serde(rename_all = "camelCase")]
/// struct Hero { hero_title: String }
///
/// let value = ContentValue::from(json!({"heroTitle": "Creative Agency"}));
/// let hero: Hero = from_value(value)?;
/// assert_eq!(hero.hero_title, "Creative Agency");
/// # Ok::<_, std::sync::Arc<studio_content::ContentError>>(())
/// ```
pub fn from_value<T: serde::de::DeserializeOwned>(value: ContentValue) -> ContentResult<T> {
    serde_json::from_value(value.to_json()).into_content()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!(null), ContentValue::Null)]
    #[case(json!(false), ContentValue::Bool(false))]
    #[case(json!(42), ContentValue::Integer(42))]
    #[case(json!(1.5), ContentValue::Double(1.5))]
    #[case(json!("Site"), ContentValue::from("Site"))]
    #[case(json!([]), ContentValue::Array(Vec::new()))]
    #[case(json!({}), ContentValue::empty_map())]
    fn converts_json_scalars_and_empties(#[case] input: Value, #[case] expected: ContentValue) {
        assert_eq!(ContentValue::from(input), expected);
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("valid date");
        let value = ContentValue::from(at);
        assert_eq!(value.to_json(), json!("2024-03-01T12:30:00Z"));
    }

    #[test]
    fn non_finite_doubles_render_as_null() {
        assert_eq!(ContentValue::Double(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn nested_json_survives_conversion() {
        let source = json!({"slides": [{"type": "image", "url": "a"}], "social": {"twitter": "#"}});
        let value = ContentValue::from(source.clone());
        assert_eq!(value.get("social").and_then(|s| s.get("twitter")), Some(&ContentValue::from("#")));
        assert_eq!(value.to_json(), source);
    }

    #[test]
    fn from_value_reports_decode_errors() {
        #[derive(Debug, serde::Deserialize)]
        #[expect(dead_code, reason = "only the failure path is exercised")]
        struct Counter {
            count: u32,
        }

        let err = from_value::<Counter>(ContentValue::from(json!({"count": "many"})))
            .expect_err("string is not a count");
        assert!(matches!(&*err, crate::ContentError::Decode(_)));
    }
}
