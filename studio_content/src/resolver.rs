//! Content resolution: fetch, map, then backfill from defaults.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::mapper::{Record, map_collection, map_record};
use crate::store::{DocumentStore, fetch_collection};
use crate::{ContentError, ContentResult, ContentValue, DefaultRecords, from_value, merge};

/// Collection holding one document per content key unless configured
/// otherwise.
pub const DEFAULT_CONTENT_COLLECTION: &str = "content";

/// Resolves content keys against a [`DocumentStore`] and injected
/// [`DefaultRecords`].
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use studio_content::store::DocumentStore;
/// use studio_content::wire::{WireCollection, WireDocument};
/// use studio_content::{ContentResolver, ContentResult, ContentValue, DefaultRecords};
///
/// /// A store with nothing in it.
/// struct EmptyStore;
///
/// impl DocumentStore for EmptyStore {
///     fn fetch_document(&self, _path: &str) -> ContentResult<Option<WireDocument>> {
///         Ok(None)
///     }
///
///     fn list_documents(&self, _: &str, _: Option<&str>) -> ContentResult<WireCollection> {
///         Ok(WireCollection::default())
///     }
/// }
///
/// let defaults = DefaultRecords::new()
///     .with_record("heroContent", json!({"heroTitle": "Creative Agency"}));
/// let resolver = ContentResolver::new(EmptyStore, defaults);
///
/// assert_eq!(
///     resolver.resolve("heroContent")?,
///     ContentValue::from(json!({"heroTitle": "Creative Agency"}))
/// );
/// # Ok::<_, std::sync::Arc<studio_content::ContentError>>(())
/// ```
#[derive(Debug)]
pub struct ContentResolver<S> {
    store: S,
    defaults: DefaultRecords,
    collection: String,
}

impl<S: DocumentStore> ContentResolver<S> {
    /// Create a resolver reading from [`DEFAULT_CONTENT_COLLECTION`].
    #[must_use]
    pub fn new(store: S, defaults: DefaultRecords) -> Self {
        Self {
            store,
            defaults,
            collection: DEFAULT_CONTENT_COLLECTION.to_owned(),
        }
    }

    /// Read content documents from `collection` instead.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// The injected Default Records.
    #[must_use]
    pub const fn defaults(&self) -> &DefaultRecords {
        &self.defaults
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Resolve `key` into a complete record.
    ///
    /// The stored document (with its `id`) is merged over the Default Record;
    /// when the store has no document the Default Record is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingDefault`] when `key` has no Default
    /// Record, and propagates transport and mapping errors. Nothing partial
    /// is returned on failure.
    pub fn resolve(&self, key: &str) -> ContentResult<ContentValue> {
        let default = self
            .defaults
            .get(key)
            .ok_or_else(|| ContentError::missing_default(key).shared())?;

        let path = format!("{}/{key}", self.collection);
        let fetched = map_record(self.store.fetch_document(&path)?)?;
        if fetched.is_none() {
            debug!(key, path, "no stored content; using defaults");
        }
        Ok(merge(default, fetched.map(Record::into_value)))
    }

    /// Resolve `key` and deserialise the result into `T`.
    ///
    /// # Errors
    ///
    /// As for [`ContentResolver::resolve`], plus [`ContentError::Decode`]
    /// when the resolved record does not fit `T`.
    pub fn resolve_as<T: DeserializeOwned>(&self, key: &str) -> ContentResult<T> {
        from_value(self.resolve(key)?)
    }

    /// Fetch and map the document at `path` without merging.
    ///
    /// # Errors
    ///
    /// Propagates transport and mapping errors; a missing document is
    /// `Ok(None)`.
    pub fn record(&self, path: &str) -> ContentResult<Option<Record>> {
        map_record(self.store.fetch_document(path)?)
    }

    /// Fetch and map every document of `collection`.
    ///
    /// # Errors
    ///
    /// Propagates transport and mapping errors.
    pub fn collection(&self, collection: &str) -> ContentResult<Vec<Record>> {
        let records = map_collection(fetch_collection(&self.store, collection)?)?;
        debug!(collection, count = records.len(), "mapped collection");
        Ok(records)
    }
}
