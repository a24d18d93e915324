//! Convenience constructors for `ContentError`.

use std::sync::Arc;

use camino::Utf8Path;

use super::ContentError;

impl ContentError {
    /// Construct a transport error for a failed store request.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_content::ContentError;
    /// let err = ContentError::transport("https://store/doc", 503, "unavailable");
    /// assert!(matches!(err, ContentError::Transport { status: 503, .. }));
    /// ```
    #[must_use]
    pub fn transport(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Construct an error for a body that does not match the wire format.
    #[must_use]
    pub fn malformed(location: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedDocument {
            location: location.into(),
            source,
        }
    }

    /// Construct an error for a tagged value whose text cannot be coerced.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_content::ContentError;
    /// let err = ContentError::invalid_value("slides[0].at", "not a timestamp");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "invalid value for field 'slides[0].at': not a timestamp"
    /// );
    /// ```
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Construct an error for a content key without a Default Record.
    #[must_use]
    pub fn missing_default(key: impl Into<String>) -> Self {
        Self::MissingDefault { key: key.into() }
    }

    /// Construct an error for an unusable defaults source.
    #[must_use]
    pub fn invalid_defaults(message: impl Into<String>) -> Self {
        Self::InvalidDefaults {
            message: message.into(),
        }
    }

    /// Construct an I/O error tied to `path`.
    #[must_use]
    pub fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap `self` in an [`Arc`] for use as a [`crate::ContentResult`] error.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns `true` when the error came from the store rather than from
    /// local mapping, merging or configuration.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Http(_))
    }
}
