//! In-memory document store for resolver and CLI tests.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use studio_content::store::DocumentStore;
use studio_content::wire::{WireCollection, WireDocument};
use studio_content::{ContentError, ContentResult};

/// A request observed by [`StaticStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreRequest {
    /// `fetch_document(path)`.
    Document(String),
    /// `list_documents(collection, token)`.
    Page {
        /// Collection path.
        collection: String,
        /// Page token supplied by the caller.
        token: Option<String>,
    },
}

/// A [`DocumentStore`] serving fixed documents and pages.
///
/// Collections are split into explicit pages; page `n` is addressed by the
/// token `page-n`. Paths registered with [`StaticStore::with_failure`]
/// answer with a transport error instead.
#[derive(Debug, Default)]
pub struct StaticStore {
    documents: BTreeMap<String, WireDocument>,
    collections: BTreeMap<String, Vec<Vec<WireDocument>>>,
    failures: BTreeMap<String, (u16, String)>,
    requests: Mutex<Vec<StoreRequest>>,
}

impl StaticStore {
    /// An empty store: every document is missing, every collection empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` at `path`.
    #[must_use]
    pub fn with_document(mut self, path: &str, document: WireDocument) -> Self {
        self.documents.insert(path.to_owned(), document);
        self
    }

    /// Serve `collection` as the given pages, in order.
    #[must_use]
    pub fn with_pages(mut self, collection: &str, pages: Vec<Vec<WireDocument>>) -> Self {
        self.collections.insert(collection.to_owned(), pages);
        self
    }

    /// Fail every request for `path` with `status`.
    #[must_use]
    pub fn with_failure(mut self, path: &str, status: u16, message: &str) -> Self {
        self.failures
            .insert(path.to_owned(), (status, message.to_owned()));
        self
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.lock().clone()
    }

    fn record(&self, request: StoreRequest) {
        self.requests.lock().push(request);
    }

    fn check_failure(&self, path: &str) -> ContentResult<()> {
        match self.failures.get(path) {
            Some((status, message)) => Err(ContentError::transport(
                format!("static://{path}"),
                *status,
                message.clone(),
            )
            .shared()),
            None => Ok(()),
        }
    }
}

impl DocumentStore for StaticStore {
    fn fetch_document(&self, path: &str) -> ContentResult<Option<WireDocument>> {
        self.record(StoreRequest::Document(path.to_owned()));
        self.check_failure(path)?;
        Ok(self.documents.get(path).cloned())
    }

    fn list_documents(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> ContentResult<WireCollection> {
        self.record(StoreRequest::Page {
            collection: collection.to_owned(),
            token: page_token.map(str::to_owned),
        });
        self.check_failure(collection)?;

        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| {
                    ContentError::transport(
                        format!("static://{collection}"),
                        400,
                        format!("unknown page token '{token}'"),
                    )
                    .shared()
                })?,
        };

        let pages = self.collections.get(collection);
        let documents = pages
            .and_then(|all| all.get(index))
            .cloned()
            .unwrap_or_default();
        let next_page_token = pages
            .filter(|all| index + 1 < all.len())
            .map(|_| format!("page-{}", index + 1));

        Ok(WireCollection {
            documents,
            next_page_token,
        })
    }
}
