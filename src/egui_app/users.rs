//! Users admin screen.
//!
//! Holds the cached copy of the user collection and keeps it in step with
//! the backend: every successful mutation is applied to the cache by id as
//! soon as its result arrives. The cache is not authoritative; changes made
//! by other clients show up on the next [`UsersScreen::refresh`].

use std::sync::Arc;

use crate::egui_app::forms::{FormController, FormPhase, SubmitOutcome};
use crate::egui_app::gateway::Gateway;
use crate::egui_app::notify::Toasts;
use crate::egui_app::pending::{GatewayResult, PendingCall};
use crate::shared::error::GatewayError;
use crate::shared::user::UserRecord;
use crate::shared::validation::UserRecordSchema;

pub const USER_ADDED: &str = "Usuario agregado correctamente.";
pub const USER_UPDATED: &str = "Usuario actualizado correctamente.";
pub const USER_DELETED: &str = "Usuario eliminado correctamente.";
pub const SAVE_FAILED: &str = "Error al guardar el usuario.";
pub const DELETE_FAILED: &str = "Error al eliminar el usuario.";
pub const FETCH_FAILED: &str = "Error al obtener usuarios.";

/// A mutation the backend accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Created(UserRecord),
    Updated(UserRecord),
}

/// Records whose first name or id contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn filter_records<'a>(records: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    let needle = query.to_lowercase();
    records.iter().filter(|record| record.matches(&needle)).collect()
}

/// State of the users list, its search box and its create/edit modal
pub struct UsersScreen {
    gateway: Arc<dyn Gateway>,
    collection: String,
    records: Vec<UserRecord>,
    /// Record form shown in the modal
    pub form: FormController<UserRecordSchema, Saved>,
    editing: Option<UserRecord>,
    pub modal_open: bool,
    pub search_query: String,
    mounted: bool,
    pending_refresh: Option<PendingCall<Vec<UserRecord>>>,
    pending_remove: Option<(String, PendingCall<()>)>,
    last_error: Option<GatewayError>,
}

impl UsersScreen {
    pub fn new(gateway: Arc<dyn Gateway>, collection: impl Into<String>) -> Self {
        Self {
            gateway,
            collection: collection.into(),
            records: Vec::new(),
            form: FormController::new(),
            editing: None,
            modal_open: false,
            search_query: String::new(),
            mounted: false,
            pending_refresh: None,
            pending_remove: None,
            last_error: None,
        }
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn editing(&self) -> Option<&UserRecord> {
        self.editing.as_ref()
    }

    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_refresh.is_some()
    }

    /// Id of the record whose deletion is in flight
    pub fn removing(&self) -> Option<&str> {
        self.pending_remove.as_ref().map(|(id, _)| id.as_str())
    }

    /// First display of the screen: load the collection once.
    pub fn mount(&mut self) {
        if !self.mounted {
            self.mounted = true;
            self.refresh();
        }
    }

    /// Reload the whole collection, replacing the cache when it arrives.
    pub fn refresh(&mut self) {
        if self.pending_refresh.is_some() {
            return;
        }
        let gateway = Arc::clone(&self.gateway);
        let collection = self.collection.clone();
        self.pending_refresh = Some(PendingCall::spawn(move || gateway.list_records(&collection)));
    }

    /// Open the modal for a new record
    pub fn open_create(&mut self) {
        if self.form.phase() == FormPhase::Submitting {
            return;
        }
        self.editing = None;
        self.form.cancel();
        self.modal_open = true;
    }

    /// Load `record` into the form and open the modal in edit mode
    pub fn begin_edit(&mut self, record: &UserRecord) {
        if self.form.phase() == FormPhase::Submitting {
            return;
        }
        self.form.state.values = record.fields.clone();
        self.form.state.validation_errors.clear();
        self.editing = Some(record.clone());
        self.modal_open = true;
    }

    /// Drop unsaved changes and leave edit mode
    pub fn cancel_edit(&mut self) {
        if self.form.phase() == FormPhase::Submitting {
            return;
        }
        self.form.cancel();
        self.editing = None;
        self.modal_open = false;
    }

    /// Save the form: update when editing, create otherwise.
    pub fn submit(&mut self) -> SubmitOutcome {
        let gateway = Arc::clone(&self.gateway);
        let collection = self.collection.clone();
        let editing_id = self.editing.as_ref().map(|record| record.id.clone());

        self.form.submit(move |fields| match editing_id {
            Some(id) => gateway
                .update_record(&collection, &id, &fields)
                .map(|()| Saved::Updated(UserRecord::new(id, fields))),
            None => gateway.create_record(&collection, &fields).map(Saved::Created),
        })
    }

    /// Delete the record with `id`. Returns false when another deletion is
    /// still running.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.pending_remove.is_some() {
            return false;
        }
        let gateway = Arc::clone(&self.gateway);
        let collection = self.collection.clone();
        let target = id.to_string();
        let call = PendingCall::spawn(move || gateway.delete_record(&collection, &target));
        self.pending_remove = Some((id.to_string(), call));
        true
    }

    /// Cached records matching `query`; never touches the backend.
    pub fn filter(&self, query: &str) -> Vec<&UserRecord> {
        filter_records(&self.records, query)
    }

    /// Records matching the search box
    pub fn visible(&self) -> Vec<&UserRecord> {
        self.filter(&self.search_query)
    }

    /// Apply every finished call. Called once per frame.
    pub fn poll(&mut self, toasts: &mut Toasts) {
        if let Some(result) = self.pending_refresh.as_ref().and_then(PendingCall::try_take) {
            self.pending_refresh = None;
            self.apply_refresh(result, toasts);
        }
        if let Some(result) = self.form.poll() {
            self.apply_save(result, toasts);
        }
        if let Some((id, result)) = self
            .pending_remove
            .as_ref()
            .and_then(|(id, call)| call.try_take().map(|result| (id.clone(), result)))
        {
            self.pending_remove = None;
            self.apply_remove(&id, result, toasts);
        }
    }

    /// Block until every running call has finished and apply them.
    pub fn wait(&mut self, toasts: &mut Toasts) {
        if let Some(call) = self.pending_refresh.take() {
            self.apply_refresh(call.wait(), toasts);
        }
        if let Some(result) = self.form.wait() {
            self.apply_save(result, toasts);
        }
        if let Some((id, call)) = self.pending_remove.take() {
            self.apply_remove(&id, call.wait(), toasts);
        }
    }

    fn apply_refresh(&mut self, result: GatewayResult<Vec<UserRecord>>, toasts: &mut Toasts) {
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Replaced user cache");
                self.records = records;
            }
            Err(error) => {
                tracing::error!(%error, "Error fetching users");
                toasts.error(FETCH_FAILED);
                self.last_error = Some(error);
            }
        }
    }

    fn apply_save(&mut self, result: GatewayResult<Saved>, toasts: &mut Toasts) {
        match result {
            Ok(Saved::Created(record)) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
                    *existing = record;
                } else {
                    self.records.push(record);
                }
                toasts.success(USER_ADDED);
                self.close_modal();
            }
            Ok(Saved::Updated(record)) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
                    existing.fields = record.fields;
                }
                toasts.success(USER_UPDATED);
                self.close_modal();
            }
            Err(error) => {
                tracing::error!(%error, "Error saving user");
                toasts.error(SAVE_FAILED);
                self.last_error = Some(error);
            }
        }
    }

    fn apply_remove(&mut self, id: &str, result: GatewayResult<()>, toasts: &mut Toasts) {
        match result {
            Ok(()) => {
                self.records.retain(|record| record.id != id);
                if self.editing.as_ref().is_some_and(|record| record.id == id) {
                    self.cancel_edit();
                }
                toasts.success(USER_DELETED);
            }
            Err(error) => {
                tracing::error!(%error, id, "Error deleting user");
                toasts.error(DELETE_FAILED);
                self.last_error = Some(error);
            }
        }
    }

    fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
    }
}
