//! Primary error enum for content resolution flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or resolving content.
///
/// A missing document is not an error: single-record fetches report it as
/// `Ok(None)` and the resolver substitutes the Default Record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    /// The store answered with a non-success status other than "not found".
    #[error("document store request to '{url}' failed with status {status}: {message}")]
    Transport {
        /// Request URL, without credentials.
        url: String,
        /// HTTP status code returned by the store.
        status: u16,
        /// Message extracted from the store's error body, or the raw body.
        message: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    ///
    /// The request URL is stripped on conversion as it may carry the API key.
    #[error("document store request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// A response body did not match the tagged wire format.
    #[error("malformed document at '{location}': {source}")]
    MalformedDocument {
        /// Document name or request URL the body came from.
        location: String,
        /// Underlying decoding failure, naming the unexpected tag or shape.
        #[source]
        source: serde_json::Error,
    },

    /// A tagged value carried text that could not be coerced to its type.
    #[error("invalid value for field '{field}': {message}")]
    InvalidValue {
        /// Dotted path of the offending field inside the document.
        field: String,
        /// Human-readable explanation of the coercion failure.
        message: String,
    },

    /// No Default Record is registered for the requested content key.
    #[error("no default record registered for content key '{key}'")]
    MissingDefault {
        /// Content key that was requested.
        key: String,
    },

    /// Default Records could not be built from the supplied source.
    #[error("invalid default records: {message}")]
    InvalidDefaults {
        /// Human-readable explanation of the problem.
        message: String,
    },

    /// A resolved value could not be converted into the requested type.
    #[error("failed to decode content: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration could not be gathered or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Reading a file from disk failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
