//! In-memory gateway.
//!
//! Stands in for the hosted backend when the app runs offline and in
//! tests. It keeps accounts and collections in a mutex-guarded store,
//! counts calls per operation, and can be primed to fail the next call.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::egui_app::gateway::Gateway;
use crate::egui_app::pending::GatewayResult;
use crate::shared::error::GatewayError;
use crate::shared::user::{Credential, Session, UserFields, UserRecord};

pub const INVALID_LOGIN_CREDENTIALS: &str = "INVALID_LOGIN_CREDENTIALS";
pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";

/// Number of calls made to each gateway operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub authenticate: usize,
    pub register: usize,
    pub list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.authenticate + self.register + self.list + self.create + self.update + self.delete
    }
}

struct Account {
    local_id: String,
    password: String,
    display_name: Option<String>,
}

#[derive(Default)]
struct Store {
    accounts: HashMap<String, Account>,
    collections: HashMap<String, Vec<UserRecord>>,
    session: Option<Session>,
    calls: CallCounts,
    fail_next: Option<GatewayError>,
}

impl Store {
    fn take_failure(&mut self) -> GatewayResult<()> {
        match self.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn open_session(&mut self, email: &str) -> Session {
        let (local_id, display_name) = self
            .accounts
            .get(email)
            .map(|a| (a.local_id.clone(), a.display_name.clone()))
            .unwrap_or_default();
        let session = Session {
            local_id,
            email: email.to_string(),
            display_name,
            id_token: Uuid::new_v4().to_string(),
            refresh_token: Uuid::new_v4().to_string(),
        };
        self.session = Some(session.clone());
        session
    }
}

/// Process-local [`Gateway`]
#[derive(Default)]
pub struct InMemoryGateway {
    store: Mutex<Store>,
}

/// 20-character alphanumeric id, the same shape the hosted backend assigns
fn new_record_id() -> String {
    Uuid::new_v4().simple().to_string().chars().take(20).collect()
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account
    pub fn with_account(self, email: &str, password: &str) -> Self {
        if let Ok(mut store) = self.store.lock() {
            store.accounts.insert(
                email.to_string(),
                Account {
                    local_id: Uuid::new_v4().simple().to_string(),
                    password: password.to_string(),
                    display_name: None,
                },
            );
        }
        self
    }

    /// Seed a collection with records
    pub fn with_records(self, collection: &str, records: Vec<UserRecord>) -> Self {
        if let Ok(mut store) = self.store.lock() {
            store.collections.insert(collection.to_string(), records);
        }
        self
    }

    /// Make the next call (of any kind) fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        if let Ok(mut store) = self.store.lock() {
            store.fail_next = Some(error);
        }
    }

    pub fn calls(&self) -> CallCounts {
        self.store.lock().map(|s| s.calls).unwrap_or_default()
    }

    /// Snapshot of the stored records of `collection`
    pub fn records(&self, collection: &str) -> Vec<UserRecord> {
        self.store
            .lock()
            .ok()
            .and_then(|s| s.collections.get(collection).cloned())
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<Session> {
        self.store.lock().ok().and_then(|s| s.session.clone())
    }

    fn lock(&self) -> GatewayResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|_| GatewayError::transient("in-memory store poisoned"))
    }
}

impl Gateway for InMemoryGateway {
    fn authenticate(&self, credential: &Credential) -> GatewayResult<Session> {
        let mut store = self.lock()?;
        store.calls.authenticate += 1;
        store.take_failure()?;

        let accepted = store
            .accounts
            .get(&credential.email)
            .is_some_and(|account| account.password == credential.password);
        if !accepted {
            return Err(GatewayError::auth(Some(INVALID_LOGIN_CREDENTIALS.to_string())));
        }
        Ok(store.open_session(&credential.email))
    }

    fn register(&self, credential: &Credential, display_name: &str) -> GatewayResult<Session> {
        let mut store = self.lock()?;
        store.calls.register += 1;
        store.take_failure()?;

        if store.accounts.contains_key(&credential.email) {
            return Err(GatewayError::auth(Some(EMAIL_EXISTS.to_string())));
        }
        store.accounts.insert(
            credential.email.clone(),
            Account {
                local_id: Uuid::new_v4().simple().to_string(),
                password: credential.password.clone(),
                display_name: Some(display_name.to_string()),
            },
        );
        Ok(store.open_session(&credential.email))
    }

    fn list_records(&self, collection: &str) -> GatewayResult<Vec<UserRecord>> {
        let mut store = self.lock()?;
        store.calls.list += 1;
        store.take_failure()?;
        Ok(store.collections.get(collection).cloned().unwrap_or_default())
    }

    fn create_record(&self, collection: &str, fields: &UserFields) -> GatewayResult<UserRecord> {
        let mut store = self.lock()?;
        store.calls.create += 1;
        store.take_failure()?;

        let record = UserRecord::new(new_record_id(), fields.clone());
        store
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn update_record(&self, collection: &str, id: &str, fields: &UserFields) -> GatewayResult<()> {
        let mut store = self.lock()?;
        store.calls.update += 1;
        store.take_failure()?;

        let record = store
            .collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(|| GatewayError::not_found(id))?;
        record.fields = fields.clone();
        Ok(())
    }

    fn delete_record(&self, collection: &str, id: &str) -> GatewayResult<()> {
        let mut store = self.lock()?;
        store.calls.delete += 1;
        store.take_failure()?;

        let records = store
            .collections
            .get_mut(collection)
            .ok_or_else(|| GatewayError::not_found(id))?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(GatewayError::not_found(id));
        }
        Ok(())
    }

    fn sign_out(&self) {
        if let Ok(mut store) = self.store.lock() {
            store.session = None;
        }
    }
}
