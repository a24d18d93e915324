//! Extension for mapping errors to `ContentResult` concisely.
//!
//! Replaces repetitive `.map_err(|e| Arc::new(ContentError::from(e)))`
//! chains when converting external error types into the crate's
//! [`ContentResult`] alias (`Result<T, Arc<ContentError>>`).
//!
//! # Examples
//!
//! ```
//! use studio_content::{ContentResult, ContentResultExt};
//!
//! fn parse(body: &str) -> ContentResult<serde_json::Value> {
//!     serde_json::from_str(body).into_content()
//! }
//!
//! assert!(parse("{}").is_ok());
//! assert!(parse("{").is_err());
//! ```

use std::sync::Arc;

use crate::{ContentError, ContentResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ContentError>` into a [`ContentResult<T>`].
pub trait ContentResultExt<T> {
    /// Convert `Result<T, E>` into `ContentResult<T>` using `Into<ContentError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ContentError>`.
    fn into_content(self) -> ContentResult<T>;
}

impl<T, E> ContentResultExt<T> for Result<T, E>
where
    E: Into<ContentError>,
{
    fn into_content(self) -> ContentResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
