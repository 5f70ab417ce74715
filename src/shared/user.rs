//! User records, credentials and sessions.
//!
//! `UserRecord` keeps the document shape of the `usuarios` collection on the
//! wire (`nombre`, `apellido`, `email`, `password`) while exposing English
//! field names in Rust.

use serde::{Deserialize, Serialize};

/// Email/password pair for a sign-in or sign-up request.
///
/// Only produced by form validation and dropped once the request finishes.
/// Not serializable.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Passwords stay out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed-in account as reported by the authentication backend. Held in
/// memory only; not serializable.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub local_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("local_id", &self.local_id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Editable fields of a user record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl UserFields {
    /// Field names as stored in the backend, in display order
    pub const WIRE_NAMES: [&'static str; 4] = ["nombre", "apellido", "email", "password"];

    /// Pairs of wire name and value, in display order
    pub fn wire_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("nombre", self.first_name.as_str()),
            ("apellido", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ]
    }
}

/// A stored user record; `id` is assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: UserFields,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, fields: UserFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Case-insensitive substring match on first name or id.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.fields.first_name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
    }
}
