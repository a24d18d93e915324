//! Tagged wire format returned by the document store's REST API.
//!
//! Every leaf is wrapped in a single-key object naming its type, for example
//! `{"stringValue": "Site"}` or `{"arrayValue": {"values": [...]}}`. The
//! types here deserialise that shape directly; any tag outside
//! [`WireValue`] fails deserialisation instead of being dropped.

use std::collections::BTreeMap;

use serde::Deserialize;

/// One tagged value.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum WireValue {
    /// `stringValue`.
    StringValue(String),
    /// `integerValue`, sent as decimal text by the REST API.
    IntegerValue(WireInteger),
    /// `doubleValue`.
    DoubleValue(WireDouble),
    /// `booleanValue`.
    BooleanValue(bool),
    /// `timestampValue`, RFC 3339 text.
    TimestampValue(String),
    /// `arrayValue`.
    ArrayValue(WireArray),
    /// `mapValue`.
    MapValue(WireMap),
    /// `nullValue`.
    NullValue(()),
}

/// Payload of `integerValue`: decimal text on the wire, plain numbers accepted.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireInteger {
    /// JSON number.
    Number(i64),
    /// Decimal text, as the REST API encodes 64-bit integers.
    Text(String),
}

/// Payload of `doubleValue`: a JSON number or one of the non-finite spellings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WireDouble {
    /// JSON number.
    Number(f64),
    /// `"NaN"`, `"Infinity"` or `"-Infinity"`.
    Text(String),
}

/// Payload of `arrayValue`. An empty array arrives as `{}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WireArray {
    /// Elements in order.
    #[serde(default)]
    pub values: Vec<WireValue>,
}

/// Payload of `mapValue`. An empty map arrives as `{}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WireMap {
    /// Tagged fields keyed by name.
    #[serde(default)]
    pub fields: BTreeMap<String, WireValue>,
}

/// A single stored document.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireDocument {
    /// Fully-qualified resource name, e.g.
    /// `projects/p/databases/(default)/documents/content/heroContent`.
    pub name: String,
    /// Tagged fields. Documents without fields omit the key entirely.
    #[serde(default)]
    pub fields: BTreeMap<String, WireValue>,
    /// Creation time as reported by the store.
    #[serde(default)]
    pub create_time: Option<String>,
    /// Last update time as reported by the store.
    #[serde(default)]
    pub update_time: Option<String>,
}

impl WireDocument {
    /// Trailing path segment of [`WireDocument::name`], used as the record id.
    ///
    /// ```
    /// use studio_content::wire::WireDocument;
    ///
    /// let doc: WireDocument =
    ///     serde_json::from_str(r#"{"name": "projects/homepage/abc123"}"#).expect("valid");
    /// assert_eq!(doc.id(), "abc123");
    /// ```
    #[must_use]
    pub fn id(&self) -> &str {
        self.name
            .rsplit_once('/')
            .map_or(self.name.as_str(), |(_, id)| id)
    }
}

/// One page of a collection listing. An empty collection arrives as `{}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireCollection {
    /// Documents on this page, in store order.
    #[serde(default)]
    pub documents: Vec<WireDocument>,
    /// Token for the next page, absent on the last one.
    #[serde(default)]
    pub next_page_token: Option<String>,
}
