//! Form Controller
//!
//! Binds a validation schema to user input and drives one gateway call per
//! submission:
//!
//! ```text
//! Idle → Validating → Invalid → Idle
//!                   → Valid → Submitting → Success → Idle
//!                                        → Failed  → Idle
//! ```
//!
//! `Validating` is synchronous inside [`FormController::submit`]; the only
//! state that outlives a frame is `Submitting`. While submitting, further
//! submits are ignored rather than queued.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::egui_app::gateway::Gateway;
use crate::egui_app::notify::Toasts;
use crate::egui_app::pending::{GatewayResult, PendingCall};
use crate::egui_app::types::AppView;
use crate::shared::error::GatewayError;
use crate::shared::user::Session;
use crate::shared::validation::{
    Field, FieldErrors, FormSchema, SignInSchema, SignInValues, SignUpSchema, SignUpValues,
};

pub const SIGNED_IN: &str = "Signed in successfully!";
pub const ACCOUNT_CREATED: &str = "Account created successfully!";

/// Values, validation errors and submitting flag of one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState<V> {
    pub values: V,
    pub validation_errors: FieldErrors,
    pub is_submitting: bool,
}

impl<V: Default> FormState<V> {
    /// Clear values and errors
    pub fn reset(&mut self) {
        self.values = V::default();
        self.validation_errors.clear();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.validation_errors.get(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

/// What a call to `submit` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the gateway call is running
    Started,
    /// Validation failed; errors are in the form state
    Invalid,
    /// A previous submission is still running; nothing happened
    Busy,
}

/// Generic form controller over a schema `S` whose submission yields `R`
pub struct FormController<S: FormSchema, R> {
    pub state: FormState<S::Values>,
    pending: Option<PendingCall<R>>,
    _schema: PhantomData<S>,
}

impl<S: FormSchema, R> Default for FormController<S, R> {
    fn default() -> Self {
        Self {
            state: FormState::default(),
            pending: None,
            _schema: PhantomData,
        }
    }
}

impl<S, R> FormController<S, R>
where
    S: FormSchema,
    S::Output: Send + 'static,
    R: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        if self.pending.is_some() {
            FormPhase::Submitting
        } else {
            FormPhase::Idle
        }
    }

    /// Validate the current values and, if valid, run `call` with the
    /// validated output on a worker thread.
    pub fn submit<F>(&mut self, call: F) -> SubmitOutcome
    where
        F: FnOnce(S::Output) -> GatewayResult<R> + Send + 'static,
    {
        if self.pending.is_some() {
            tracing::debug!("Submit ignored: request already in flight");
            return SubmitOutcome::Busy;
        }

        match S::validate(&self.state.values) {
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "Form invalid");
                self.state.validation_errors = errors;
                SubmitOutcome::Invalid
            }
            Ok(output) => {
                self.state.validation_errors.clear();
                self.state.is_submitting = true;
                self.pending = Some(PendingCall::spawn(move || call(output)));
                SubmitOutcome::Started
            }
        }
    }

    /// Apply a finished call, if any. Success clears the values; failure
    /// keeps them for correction.
    pub fn poll(&mut self) -> Option<GatewayResult<R>> {
        let result = self.pending.as_ref()?.try_take()?;
        Some(self.finish(result))
    }

    /// Block until the running call finishes and apply it.
    pub fn wait(&mut self) -> Option<GatewayResult<R>> {
        let result = self.pending.as_ref()?.wait();
        Some(self.finish(result))
    }

    fn finish(&mut self, result: GatewayResult<R>) -> GatewayResult<R> {
        self.pending = None;
        self.state.is_submitting = false;
        if result.is_ok() {
            self.state.reset();
        }
        result
    }

    /// Discard values and errors. Ignored while submitting.
    pub fn cancel(&mut self) {
        if self.pending.is_none() {
            self.state.reset();
        }
    }
}

fn report_failure(toasts: &mut Toasts, error: &GatewayError) {
    tracing::warn!(%error, "Request failed");
    toasts.error(error.user_message());
}

/// Sign-in form
pub struct SignInController {
    pub form: FormController<SignInSchema, Session>,
    gateway: Arc<dyn Gateway>,
    destination: AppView,
}

impl SignInController {
    /// `destination` is where a successful sign-in navigates to
    pub fn new(gateway: Arc<dyn Gateway>, destination: AppView) -> Self {
        Self {
            form: FormController::new(),
            gateway,
            destination,
        }
    }

    pub fn values_mut(&mut self) -> &mut SignInValues {
        &mut self.form.state.values
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let gateway = Arc::clone(&self.gateway);
        self.form.submit(move |credential| gateway.authenticate(&credential))
    }

    /// Apply a finished sign-in. On success the toast is pushed and
    /// `navigate` is called once with the post-login destination.
    pub fn poll(
        &mut self,
        toasts: &mut Toasts,
        navigate: impl FnOnce(AppView),
    ) -> Option<Session> {
        let result = self.form.poll()?;
        self.apply(result, toasts, navigate)
    }

    /// Blocking variant of [`poll`](Self::poll)
    pub fn wait(&mut self, toasts: &mut Toasts, navigate: impl FnOnce(AppView)) -> Option<Session> {
        let result = self.form.wait()?;
        self.apply(result, toasts, navigate)
    }

    fn apply(
        &mut self,
        result: GatewayResult<Session>,
        toasts: &mut Toasts,
        navigate: impl FnOnce(AppView),
    ) -> Option<Session> {
        match result {
            Ok(session) => {
                toasts.success(SIGNED_IN);
                navigate(self.destination.clone());
                Some(session)
            }
            Err(error) => {
                report_failure(toasts, &error);
                None
            }
        }
    }
}

/// Sign-up form
pub struct SignUpController {
    pub form: FormController<SignUpSchema, Session>,
    gateway: Arc<dyn Gateway>,
}

impl SignUpController {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            form: FormController::new(),
            gateway,
        }
    }

    pub fn values_mut(&mut self) -> &mut SignUpValues {
        &mut self.form.state.values
    }

    /// Password confirmation is checked by the schema, so a mismatch never
    /// reaches the gateway.
    pub fn submit(&mut self, toasts: &mut Toasts) -> SubmitOutcome {
        let gateway = Arc::clone(&self.gateway);
        let outcome = self
            .form
            .submit(move |request| gateway.register(&request.credential, &request.display_name));
        if let Some(message) = self.form.state.error(Field::ConfirmPassword) {
            toasts.error(message);
        }
        outcome
    }

    pub fn poll(&mut self, toasts: &mut Toasts) -> Option<Session> {
        let result = self.form.poll()?;
        Self::apply(result, toasts)
    }

    pub fn wait(&mut self, toasts: &mut Toasts) -> Option<Session> {
        let result = self.form.wait()?;
        Self::apply(result, toasts)
    }

    fn apply(result: GatewayResult<Session>, toasts: &mut Toasts) -> Option<Session> {
        match result {
            Ok(session) => {
                toasts.success(ACCOUNT_CREATED);
                Some(session)
            }
            Err(error) => {
                report_failure(toasts, &error);
                None
            }
        }
    }
}
