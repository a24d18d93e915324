//! Blocking client for the Firestore REST API.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::DocumentStore;
use crate::wire::{WireCollection, WireDocument};
use crate::{ContentError, ContentResult, ContentResultExt, StoreConfig};

/// [`DocumentStore`] backed by the Firestore REST API.
///
/// Each call performs exactly one HTTP round trip. The client neither
/// retries nor caches; callers that want either wrap the store.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    documents_root: String,
    api_key: Option<String>,
    page_size: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("documents_root", &self.documents_root)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    /// Build a store client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Http`] when the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: &StoreConfig) -> ContentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .into_content()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a store around an existing HTTP client.
    #[must_use]
    pub fn with_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            documents_root: format!(
                "{}/projects/{}/databases/{}/documents",
                config.base_url.trim_end_matches('/'),
                config.project_id,
                config.database,
            ),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        }
    }

    /// URL of the document or collection at `path`, without credentials.
    ///
    /// ```
    /// use studio_content::{RestStore, StoreConfig};
    ///
    /// let store = RestStore::new(&StoreConfig::new("homepage"))?;
    /// assert_eq!(
    ///     store.document_url("content/heroContent"),
    ///     "https://firestore.googleapis.com/v1/projects/homepage/databases/(default)/documents/content/heroContent"
    /// );
    /// # Ok::<_, std::sync::Arc<studio_content::ContentError>>(())
    /// ```
    #[must_use]
    pub fn document_url(&self, path: &str) -> String {
        format!("{}/{}", self.documents_root, path.trim_matches('/'))
    }

    fn get(
        &self,
        url: &str,
        mut query: Vec<(&'static str, String)>,
    ) -> ContentResult<(StatusCode, String)> {
        if let Some(key) = &self.api_key {
            query.push(("key", key.clone()));
        }
        debug!(url, "requesting from document store");
        let response = self.client.get(url).query(&query).send().into_content()?;
        let status = response.status();
        let body = response.text().into_content()?;
        Ok((status, body))
    }
}

impl DocumentStore for RestStore {
    fn fetch_document(&self, path: &str) -> ContentResult<Option<WireDocument>> {
        let url = self.document_url(path);
        let (status, body) = self.get(&url, Vec::new())?;
        read_document(&url, status, &body)
    }

    fn list_documents(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> ContentResult<WireCollection> {
        let url = self.document_url(collection);
        let mut query = vec![("pageSize", self.page_size.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_owned()));
        }
        let (status, body) = self.get(&url, query)?;
        read_page(&url, status, &body)
    }
}

fn read_document(
    url: &str,
    status: StatusCode,
    body: &str,
) -> ContentResult<Option<WireDocument>> {
    if status == StatusCode::NOT_FOUND {
        debug!(url, "document not found");
        return Ok(None);
    }
    ensure_success(url, status, body)?;
    decode(url, body).map(Some)
}

fn read_page(url: &str, status: StatusCode, body: &str) -> ContentResult<WireCollection> {
    ensure_success(url, status, body)?;
    if body.trim().is_empty() {
        return Ok(WireCollection::default());
    }
    decode(url, body)
}

fn ensure_success(url: &str, status: StatusCode, body: &str) -> ContentResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = error_message(body);
    warn!(url, status = status.as_u16(), %message, "document store request failed");
    Err(ContentError::transport(url, status.as_u16(), message).shared())
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_owned()
            } else {
                trimmed.to_owned()
            }
        },
        |parsed| parsed.error.message,
    )
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> ContentResult<T> {
    serde_json::from_str(body).map_err(|err| ContentError::malformed(url, err).shared())
}
