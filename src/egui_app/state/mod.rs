use std::sync::Arc;
use std::time::Instant;

use crate::egui_app::forms::{SignInController, SignUpController, SubmitOutcome};
use crate::egui_app::gateway::Gateway;
use crate::egui_app::notify::Toasts;
use crate::egui_app::users::UsersScreen;
use crate::egui_app::{AppView, Config, UserInfo};

/// View a successful sign-in lands on
pub const POST_LOGIN_VIEW: AppView = AppView::Users;

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    gateway: Arc<dyn Gateway>,
    pub current_view: AppView,
    pub is_signup_mode: bool,
    pub user: Option<UserInfo>,
    pub sign_in: SignInController,
    pub sign_up: SignUpController,
    pub users: UsersScreen,
    pub toasts: Toasts,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn Gateway>) -> Self {
        tracing::info!(collection = config.collection(), offline = config.offline(), "AppState initialized");

        Self {
            sign_in: SignInController::new(Arc::clone(&gateway), POST_LOGIN_VIEW),
            sign_up: SignUpController::new(Arc::clone(&gateway)),
            users: UsersScreen::new(Arc::clone(&gateway), config.collection()),
            config,
            gateway,
            current_view: AppView::Auth,
            is_signup_mode: false,
            user: None,
            toasts: Toasts::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Apply finished background calls and expire old toasts. Called once
    /// per frame before rendering.
    pub fn check_pending(&mut self) {
        let mut destination = None;
        if let Some(session) = self.sign_in.poll(&mut self.toasts, |view| destination = Some(view)) {
            self.user = Some(UserInfo::from(&session));
        }
        if let Some(view) = destination {
            self.navigate(view);
        }

        if let Some(session) = self.sign_up.poll(&mut self.toasts) {
            tracing::info!(email = %session.email, "Account created");
            self.is_signup_mode = false;
        }

        if self.current_view == AppView::Users {
            self.users.mount();
        }
        self.users.poll(&mut self.toasts);
        self.toasts.expire(Instant::now());
    }

    pub fn navigate(&mut self, view: AppView) {
        tracing::debug!(?view, "Navigate");
        self.current_view = view;
    }

    pub fn handle_sign_in(&mut self) -> SubmitOutcome {
        self.sign_in.submit()
    }

    pub fn handle_sign_up(&mut self) -> SubmitOutcome {
        self.sign_up.submit(&mut self.toasts)
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.sign_in.form.cancel();
        self.sign_up.form.cancel();
    }

    /// Drop the session and start over on the auth view
    pub fn logout(&mut self) {
        self.gateway.sign_out();
        self.user = None;
        self.is_signup_mode = false;
        self.sign_in = SignInController::new(Arc::clone(&self.gateway), POST_LOGIN_VIEW);
        self.sign_up = SignUpController::new(Arc::clone(&self.gateway));
        self.users = UsersScreen::new(Arc::clone(&self.gateway), self.config.collection());
        self.current_view = AppView::Auth;
    }
}
