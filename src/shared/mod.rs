//! Shared Module
//!
//! Types that do not depend on the UI toolkit: the user record model,
//! the form validation schemas, configuration and error types. Everything
//! here is plain data plus pure functions, so it can be tested without a
//! window or a network.

/// User records, credentials and sessions
pub mod user;

/// Form validation schemas
pub mod validation;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use user::{Credential, Session, UserFields, UserRecord};
pub use error::{GatewayError, SharedError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use validation::{Field, FieldErrors};
