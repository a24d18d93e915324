//! Store configuration, layered with Figment.
//!
//! Precedence, lowest first: built-in defaults, the TOML configuration file,
//! `STUDIO_CONTENT_*` environment variables, then explicit overrides (usually
//! command-line flags). Overrides that are `None` leave lower layers intact.

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{ContentError, ContentResult, ContentResultExt};

/// Configuration file looked up from the working directory upwards.
pub const CONFIG_FILE_NAME: &str = "studio-content.toml";

/// Prefix for environment variable overrides, e.g. `STUDIO_CONTENT_PROJECT_ID`.
pub const ENV_PREFIX: &str = "STUDIO_CONTENT_";

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_DATABASE: &str = "(default)";
const DEFAULT_COLLECTION: &str = "content";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings for talking to the document store.
///
/// Text settings also accept bare numbers and booleans, since environment
/// values such as `STUDIO_CONTENT_CONTENT_COLLECTION=2024` arrive parsed.
/// Numbers are rendered back in their canonical form (`1.50` reads as
/// `1.5`).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Cloud project hosting the database.
    #[serde(deserialize_with = "text")]
    pub project_id: String,
    /// Database id within the project.
    #[serde(deserialize_with = "text")]
    pub database: String,
    /// REST API root, without a trailing slash.
    #[serde(deserialize_with = "text")]
    pub base_url: String,
    /// Web API key appended as `?key=` when present.
    #[serde(default, deserialize_with = "optional_text")]
    pub api_key: Option<String>,
    /// Collection holding one document per content key.
    #[serde(deserialize_with = "text")]
    pub content_collection: String,
    /// Documents requested per collection page.
    pub page_size: u32,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// JSON file holding the Default Records.
    #[serde(default, deserialize_with = "optional_text")]
    pub defaults_path: Option<Utf8PathBuf>,
}

/// A scalar read where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Scalar::deserialize(deserializer).map(|value| T::from(String::from(value)))
}

fn optional_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Option::<Scalar>::deserialize(deserializer)
        .map(|value| value.map(|scalar| T::from(String::from(scalar))))
}

impl StoreConfig {
    /// Configuration for `project_id` with every other setting at its default.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            content_collection: DEFAULT_COLLECTION.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            defaults_path: None,
        }
    }

    fn validate(self) -> ContentResult<Self> {
        if self.project_id.trim().is_empty() {
            return Err(config_error("project_id must not be empty"));
        }
        if self.page_size == 0 {
            return Err(config_error("page_size must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(config_error("timeout_secs must be at least 1"));
        }
        Ok(self)
    }
}

fn config_error(message: &str) -> std::sync::Arc<ContentError> {
    ContentError::from(figment::Error::from(message.to_owned())).shared()
}

/// A partial configuration layer. Unset fields are not serialised, so they
/// never shadow values from lower layers.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ConfigLayer {
    /// See [`StoreConfig::project_id`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// See [`StoreConfig::database`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// See [`StoreConfig::base_url`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// See [`StoreConfig::api_key`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// See [`StoreConfig::content_collection`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_collection: Option<String>,
    /// See [`StoreConfig::page_size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// See [`StoreConfig::timeout_secs`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// See [`StoreConfig::defaults_path`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_path: Option<Utf8PathBuf>,
}

impl ConfigLayer {
    /// Built-in defaults. `project_id` has none and must come from a
    /// higher layer.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_owned()),
            base_url: Some(DEFAULT_BASE_URL.to_owned()),
            content_collection: Some(DEFAULT_COLLECTION.to_owned()),
            page_size: Some(DEFAULT_PAGE_SIZE),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            ..Self::default()
        }
    }
}

/// Gathers [`StoreConfig`] from every layer.
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    file: Option<Utf8PathBuf>,
    overrides: ConfigLayer,
}

impl ConfigLoader {
    /// Loader reading [`CONFIG_FILE_NAME`] and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` instead of searching for [`CONFIG_FILE_NAME`]. The file
    /// must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Apply `overrides` above every other layer.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigLayer) -> Self {
        self.overrides = overrides;
        self
    }

    /// The composed Figment, before extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] when an explicit file does not exist.
    pub fn figment(&self) -> ContentResult<Figment> {
        let base = Figment::from(Serialized::defaults(ConfigLayer::defaults()));
        let with_file = match &self.file {
            Some(path) => {
                ensure_file(path)?;
                base.merge(Toml::file(path.as_std_path()))
            }
            None => base.merge(Toml::file(CONFIG_FILE_NAME)),
        };
        Ok(with_file
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(self.overrides.clone())))
    }

    /// Extract and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] when a layer cannot be parsed, a
    /// required value (such as `project_id`) is missing or a value is out of
    /// range, and [`ContentError::Io`] when an explicit file does not exist.
    pub fn load(&self) -> ContentResult<StoreConfig> {
        let config = self
            .figment()?
            .extract::<StoreConfig>()
            .into_content()?
            .validate()?;
        debug!(
            project = %config.project_id,
            database = %config.database,
            collection = %config.content_collection,
            "loaded store configuration"
        );
        Ok(config)
    }
}

fn ensure_file(path: &Utf8Path) -> ContentResult<()> {
    if path.as_std_path().is_file() {
        Ok(())
    } else {
        Err(ContentError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "configuration file not found"),
        )
        .shared())
    }
}
