//! Conversions from external error types into `ContentError`.

use figment::Error as FigmentError;

use super::ContentError;

impl From<FigmentError> for ContentError {
    fn from(e: FigmentError) -> Self {
        Self::Config(Box::new(e))
    }
}

impl From<reqwest::Error> for ContentError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.without_url())
    }
}
