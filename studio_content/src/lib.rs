//! Content resolution for the studio marketing site.
//!
//! Page content lives in a document store (the Firestore REST API) as tagged
//! wire documents. This crate turns those documents into plain
//! [`ContentValue`] trees with the [`mapper`] and backfills every field the
//! store omits from an injected [`DefaultRecords`] registry with [`merge`].
//! [`ContentResolver`] ties the two together behind the [`DocumentStore`]
//! seam.
//!
//! # Example
//!
//! ```rust
//! use studio_content::{ContentValue, merge};
//! use serde_json::json;
//!
//! let defaults = ContentValue::from(json!({
//!     "heroTitle": "Creative Agency",
//!     "social": {"twitter": "#"},
//! }));
//! let fetched = ContentValue::from(json!({"social": {"instagram": "#"}}));
//!
//! let resolved = merge(&defaults, Some(fetched));
//! assert_eq!(
//!     resolved,
//!     ContentValue::from(json!({
//!         "heroTitle": "Creative Agency",
//!         "social": {"twitter": "#", "instagram": "#"},
//!     }))
//! );
//! ```

mod config;
mod defaults;
mod error;
pub mod mapper;
mod merge;
mod resolver;
mod result_ext;
pub mod store;
mod value;
pub mod wire;

pub use config::{CONFIG_FILE_NAME, ConfigLayer, ConfigLoader, ENV_PREFIX, StoreConfig};
pub use defaults::DefaultRecords;
pub use error::ContentError;
pub use mapper::{Record, map_collection, map_document, map_record};
pub use merge::{merge, merge_value};
pub use resolver::{ContentResolver, DEFAULT_CONTENT_COLLECTION};
pub use result_ext::ContentResultExt;
pub use store::{DocumentStore, RestStore, fetch_collection};
pub use value::{ContentMap, ContentValue, from_value};

use std::sync::Arc;

/// Result alias used throughout the crate.
///
/// Errors are shared behind an [`Arc`] so they can be cloned into logs and
/// returned to callers without re-allocating the underlying error.
pub type ContentResult<T> = Result<T, Arc<ContentError>>;
