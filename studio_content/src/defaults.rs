//! Registry of Default Records, one per content key.
//!
//! The registry is an immutable value handed to [`crate::ContentResolver`]
//! at construction time. Nothing in the crate keeps defaults in global
//! state, so tests can pair arbitrary defaults with arbitrary stores.

use std::collections::BTreeMap;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use tracing::debug;

use crate::{ContentError, ContentResult, ContentValue};

/// Default Records keyed by content key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefaultRecords {
    records: BTreeMap<String, ContentValue>,
}

impl DefaultRecords {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Return a registry with `value` registered under `key`.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use studio_content::DefaultRecords;
    ///
    /// let defaults = DefaultRecords::new()
    ///     .with_record("heroContent", json!({"heroTitle": "Creative Agency"}));
    /// assert!(defaults.get("heroContent").is_some());
    /// ```
    #[must_use]
    pub fn with_record(mut self, key: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        self.records.insert(key.into(), value.into());
        self
    }

    /// Build a registry from a JSON object mapping content keys to records.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidDefaults`] when `value` is not an object
    /// or any record inside it is not an object.
    pub fn from_json(value: Value) -> ContentResult<Self> {
        let Value::Object(entries) = value else {
            return Err(ContentError::invalid_defaults(
                "expected an object mapping content keys to default records",
            )
            .shared());
        };

        entries
            .into_iter()
            .map(|(key, record)| {
                if record.is_object() {
                    Ok((key, ContentValue::from(record)))
                } else {
                    Err(ContentError::invalid_defaults(format!(
                        "default record '{key}' must be an object"
                    ))
                    .shared())
                }
            })
            .collect::<ContentResult<BTreeMap<_, _>>>()
            .map(|records| Self { records })
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] when the file cannot be read,
    /// [`ContentError::InvalidDefaults`] when it is not valid JSON or has the
    /// wrong shape.
    pub fn load(path: &Utf8Path) -> ContentResult<Self> {
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            ContentError::invalid_defaults(format!("'{path}' does not name a file")).shared()
        })?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| ContentError::io(parent, err).shared())?;
        let text = dir
            .read_to_string(file_name)
            .map_err(|err| ContentError::io(path, err).shared())?;
        let json: Value = serde_json::from_str(&text).map_err(|err| {
            ContentError::invalid_defaults(format!("'{path}' is not valid JSON: {err}")).shared()
        })?;

        let defaults = Self::from_json(json)?;
        debug!(path = %path, records = defaults.len(), "loaded default records");
        Ok(defaults)
    }

    /// Default Record for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContentValue> {
        self.records.get(key)
    }

    /// Registered content keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no records are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DefaultRecords
where
    K: Into<String>,
    V: Into<ContentValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
