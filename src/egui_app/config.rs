use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Environment variable names
pub const ENV_API_KEY: &str = "GAZI_API_KEY";
pub const ENV_PROJECT_ID: &str = "GAZI_PROJECT_ID";
pub const ENV_AUTH_URL: &str = "GAZI_AUTH_URL";
pub const ENV_FIRESTORE_URL: &str = "GAZI_FIRESTORE_URL";
pub const ENV_COLLECTION: &str = "GAZI_COLLECTION";
pub const ENV_OFFLINE: &str = "GAZI_OFFLINE";

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut builder = AppConfig::builder().offline(get(ENV_OFFLINE).as_deref() == Some("1"));
        if let Some(key) = get(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(project) = get(ENV_PROJECT_ID) {
            builder = builder.project_id(project);
        }
        if let Some(url) = get(ENV_AUTH_URL) {
            builder = builder.auth_url(url);
        }
        if let Some(url) = get(ENV_FIRESTORE_URL) {
            builder = builder.firestore_url(url);
        }
        if let Some(collection) = get(ENV_COLLECTION) {
            builder = builder.collection(collection);
        }
        Self::with_builder(builder)
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Collection the admin screen manages
    pub fn collection(&self) -> &str {
        &self.app.collection
    }

    /// Whether the in-memory gateway is used
    pub fn offline(&self) -> bool {
        self.app.offline
    }
}
