//! Configuration management for sportdesk

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream REST API
    #[serde(default)]
    pub api: ApiConfig,

    /// Collection loader settings
    #[serde(default)]
    pub loader: LoaderConfig,

    /// User listing resource
    #[serde(default = "default_users_resource")]
    pub users: ResourceConfig,

    /// Sport club listing resource
    #[serde(default = "default_clubs_resource")]
    pub clubs: ResourceConfig,

    /// Listing interaction settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Collection loader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Abort a load after this many pages; unlimited when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<usize>,
}

/// One listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Path of the first page, relative to `api.base_url`
    pub path: String,

    /// Path used to delete one item; `{id}` is substituted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_path: Option<String>,
}

impl ResourceConfig {
    /// Resource without a server-side delete
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delete_path: None,
        }
    }

    /// Delete path for a specific item, if one is configured
    ///
    /// The id is percent-encoded so it always stays a single path segment.
    pub fn delete_path_for(&self, id: &impl std::fmt::Display) -> Option<String> {
        let id = id.to_string();
        self.delete_path
            .as_ref()
            .map(|template| template.replace("{id}", &urlencoding::encode(&id)))
    }
}

/// Listing interaction configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Send a DELETE upstream after a confirmed local removal
    #[serde(default)]
    pub persist_deletes: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("sportdesk/{}", env!("CARGO_PKG_VERSION"))
}

fn default_users_resource() -> ResourceConfig {
    ResourceConfig::new("users/")
}

fn default_clubs_resource() -> ResourceConfig {
    ResourceConfig::new("sportclubs/all/")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            loader: LoaderConfig::default(),
            users: default_users_resource(),
            clubs: default_clubs_resource(),
            listing: ListingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `sportdesk.toml` and `SPORTDESK__*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file when given
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unparsable, or the result fails validation.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("sportdesk").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("SPORTDESK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the loader cannot work with
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::validation("api.base_url", "must not be empty"));
        }
        if self.api.request_timeout == 0 {
            return Err(crate::Error::validation(
                "api.request_timeout",
                "must be greater than zero",
            ));
        }
        if self.loader.max_pages == Some(0) {
            return Err(crate::Error::validation(
                "loader.max_pages",
                "must be greater than zero",
            ));
        }
        for (name, resource) in [("users", &self.users), ("clubs", &self.clubs)] {
            if resource.path.trim().is_empty() {
                return Err(crate::Error::validation(
                    format!("{name}.path"),
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}
