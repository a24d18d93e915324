//! Error types for `studio-content`.

use std::sync::Arc;

use studio_content::ContentError;
use thiserror::Error;

/// Errors surfaced by the `studio-content` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration, fetching, mapping or resolution failed.
    #[error(transparent)]
    Content(#[from] Arc<ContentError>),

    /// The result could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
