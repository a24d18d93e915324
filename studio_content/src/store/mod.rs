//! Access to the document store.
//!
//! [`DocumentStore`] is the seam between resolution and transport: the
//! resolver only ever talks to the trait, [`RestStore`] implements it over
//! the Firestore REST API, and tests substitute in-memory fakes.

mod rest;

pub use rest::RestStore;

use std::collections::BTreeSet;

use tracing::warn;

use crate::ContentResult;
use crate::wire::{WireCollection, WireDocument};

/// Read access to stored documents.
pub trait DocumentStore {
    /// Fetch the document at `path`, relative to the database root
    /// (for example `content/heroContent`).
    ///
    /// Returns `Ok(None)` when the store reports the document as missing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ContentError::Transport`] or
    /// [`crate::ContentError::Http`] when the request fails, and
    /// [`crate::ContentError::MalformedDocument`] when the body is not a
    /// wire document.
    fn fetch_document(&self, path: &str) -> ContentResult<Option<WireDocument>>;

    /// Fetch one page of the documents in `collection`.
    ///
    /// # Errors
    ///
    /// As for [`DocumentStore::fetch_document`]; a missing collection is not
    /// reported as `None` but as an empty page or a transport error,
    /// depending on the store.
    fn list_documents(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> ContentResult<WireCollection>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn fetch_document(&self, path: &str) -> ContentResult<Option<WireDocument>> {
        (**self).fetch_document(path)
    }

    fn list_documents(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> ContentResult<WireCollection> {
        (**self).list_documents(collection, page_token)
    }
}

/// Fetch every page of `collection`, concatenating documents in store order.
///
/// Stops when a page carries no `nextPageToken`, or when the store hands
/// back a token it has already been given.
///
/// # Errors
///
/// Returns the first error reported by `store`.
pub fn fetch_collection<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
) -> ContentResult<WireCollection> {
    let mut documents = Vec::new();
    let mut seen = BTreeSet::new();
    let mut token: Option<String> = None;

    loop {
        let page = store.list_documents(collection, token.as_deref())?;
        documents.extend(page.documents);
        match page.next_page_token.filter(|next| !next.is_empty()) {
            Some(next) if !seen.insert(next.clone()) => {
                warn!(collection, token = %next, "store repeated a page token; stopping");
                break;
            }
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(WireCollection {
        documents,
        next_page_token: None,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::ContentError;

    /// Serves one empty page per call, cycling through `tokens`.
    struct CyclingStore {
        tokens: Vec<&'static str>,
        calls: RefCell<Vec<Option<String>>>,
    }

    impl DocumentStore for CyclingStore {
        fn fetch_document(&self, path: &str) -> ContentResult<Option<WireDocument>> {
            Err(ContentError::transport(path, 500, "documents are not served").shared())
        }

        fn list_documents(
            &self,
            _collection: &str,
            page_token: Option<&str>,
        ) -> ContentResult<WireCollection> {
            let mut calls = self.calls.borrow_mut();
            let next = self.tokens.iter().cycle().nth(calls.len()).copied();
            calls.push(page_token.map(str::to_owned));
            Ok(WireCollection {
                documents: Vec::new(),
                next_page_token: next.map(str::to_owned),
            })
        }
    }

    #[test]
    fn stops_when_tokens_cycle() {
        let store = CyclingStore {
            tokens: vec!["a", "b"],
            calls: RefCell::new(Vec::new()),
        };
        let collection = fetch_collection(&store, "content").expect("paging stops");
        assert!(collection.documents.is_empty());
        assert_eq!(
            *store.calls.borrow(),
            vec![None, Some("a".to_owned()), Some("b".to_owned())]
        );
    }
}
