//! Remote Data Gateway
//!
//! The single boundary through which authentication and record
//! persistence are reached. Controllers hold an `Arc<dyn Gateway>` and
//! never see the backend client or its session.
//!
//! - **`firebase`** - hosted backend over its REST APIs
//! - **`memory`** - process-local backend for offline mode and tests

use std::sync::Arc;

use crate::egui_app::pending::GatewayResult;
use crate::shared::config::AppConfig;
use crate::shared::user::{Credential, Session, UserFields, UserRecord};

pub mod firebase;
pub mod memory;

pub use firebase::FirebaseGateway;
pub use memory::InMemoryGateway;

/// Authentication and record persistence backend.
///
/// Methods block until the backend answers; callers run them off the UI
/// thread (see [`PendingCall`](crate::egui_app::pending::PendingCall)).
pub trait Gateway: Send + Sync {
    /// Sign in with email and password.
    fn authenticate(&self, credential: &Credential) -> GatewayResult<Session>;

    /// Create an account and set its profile display name.
    fn register(&self, credential: &Credential, display_name: &str) -> GatewayResult<Session>;

    /// Every record in `collection`.
    fn list_records(&self, collection: &str) -> GatewayResult<Vec<UserRecord>>;

    /// Store a new record; the returned record carries the assigned id.
    fn create_record(&self, collection: &str, fields: &UserFields) -> GatewayResult<UserRecord>;

    /// Overwrite the fields of an existing record.
    fn update_record(&self, collection: &str, id: &str, fields: &UserFields) -> GatewayResult<()>;

    /// Delete an existing record.
    fn delete_record(&self, collection: &str, id: &str) -> GatewayResult<()>;

    /// Forget the current session, if any.
    fn sign_out(&self);
}

/// Pick the gateway implementation for `config`
pub fn connect(config: &AppConfig) -> GatewayResult<Arc<dyn Gateway>> {
    if config.offline {
        tracing::info!("Offline mode: using in-memory gateway");
        return Ok(Arc::new(InMemoryGateway::new()));
    }
    let gateway = FirebaseGateway::new(config.clone())?;
    tracing::info!(project = %config.project_id, "Connected gateway to hosted backend");
    Ok(Arc::new(gateway))
}
