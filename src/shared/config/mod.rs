//! Application configuration module
//!
//! Backend connection parameters. They are opaque to the rest of the crate:
//! only the gateway turns them into URLs.

use thiserror::Error;

/// Default Identity Toolkit endpoint
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";
/// Default Firestore endpoint
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
/// Collection holding the admin-managed user records
pub const DEFAULT_COLLECTION: &str = "usuarios";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Web API key of the backend project
    pub api_key: String,
    /// Backend project identifier
    pub project_id: String,
    /// Base URL of the authentication service
    pub auth_url: String,
    /// Base URL of the document database
    pub firestore_url: String,
    /// Collection the admin screen works on
    pub collection: String,
    /// Use the in-memory gateway instead of the remote backend
    pub offline: bool,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collection.trim().is_empty() || self.collection.contains('/') {
            return Err(ConfigError::InvalidCollection(self.collection.clone()));
        }
        if self.offline {
            return Ok(());
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("api_key"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::MissingValue("project_id"));
        }
        for url in [&self.auth_url, &self.firestore_url] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<String>,
    project_id: Option<String>,
    auth_url: Option<String>,
    firestore_url: Option<String>,
    collection: Option<String>,
    offline: bool,
}

impl AppConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn project_id(mut self, project: impl Into<String>) -> Self {
        self.project_id = Some(project.into());
        self
    }

    /// Override the authentication endpoint (tests point this at a mock)
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    pub fn firestore_url(mut self, url: impl Into<String>) -> Self {
        self.firestore_url = Some(url.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            api_key: self.api_key.unwrap_or_default(),
            project_id: self.project_id.unwrap_or_default(),
            auth_url: trim_slash(self.auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())),
            firestore_url: trim_slash(
                self.firestore_url.unwrap_or_else(|| DEFAULT_FIRESTORE_URL.to_string()),
            ),
            collection: self.collection.unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            offline: self.offline,
        };
        config.validate()?;
        Ok(config)
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),
}
