//! End-to-end flows over the in-memory gateway

use std::sync::Arc;
use std::time::Duration;

use gazi_admin::egui_app::forms::{SubmitOutcome, ACCOUNT_CREATED, SIGNED_IN};
use gazi_admin::egui_app::gateway::InMemoryGateway;
use gazi_admin::egui_app::notify::{ToastKind, Toasts};
use gazi_admin::egui_app::users::{UsersScreen, DELETE_FAILED, USER_ADDED, USER_DELETED, USER_UPDATED};
use gazi_admin::egui_app::{AppState, AppView, Config};
use gazi_admin::shared::config::AppConfig;
use gazi_admin::shared::error::GatewayError;
use gazi_admin::shared::validation::{Field, RECORD_PASSWORD_TOO_SHORT};
use pretty_assertions::assert_eq;

use crate::common::{fields, record};

const COLLECTION: &str = "usuarios";

fn app(gateway: &Arc<InMemoryGateway>) -> AppState {
    let config = Config::with_builder(AppConfig::builder().offline(true)).unwrap();
    AppState::new(config, gateway.clone())
}

/// Run frames until no background call is in flight
fn settle(state: &mut AppState) {
    for _ in 0..1000 {
        state.check_pending();
        let busy = state.sign_in.form.state.is_submitting
            || state.sign_up.form.state.is_submitting
            || state.users.form.state.is_submitting
            || state.users.is_loading()
            || state.users.removing().is_some();
        if !busy {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("background calls did not finish");
}

fn latest_message(state: &AppState) -> Option<(ToastKind, String)> {
    state
        .toasts
        .latest()
        .map(|toast| (toast.kind.clone(), toast.message.clone()))
}

#[test]
fn test_sign_up_then_sign_in_then_manage_users() {
    let gateway = Arc::new(InMemoryGateway::new().with_records(COLLECTION, vec![record("seed-1", "Bruno")]));
    let mut state = app(&gateway);

    // Sign up
    state.toggle_auth_mode();
    {
        let values = state.sign_up.values_mut();
        values.first_name = "Ana".to_string();
        values.last_name = "Ruiz".to_string();
        values.email = "ana@mail.com".to_string();
        values.password = "abcdef".to_string();
        values.confirm_password = "abcdef".to_string();
    }
    assert_eq!(state.handle_sign_up(), SubmitOutcome::Started);
    settle(&mut state);
    assert_eq!(latest_message(&state), Some((ToastKind::Success, ACCOUNT_CREATED.to_string())));
    assert!(!state.is_signup_mode);
    assert_eq!(state.current_view, AppView::Auth);

    // Sign in lands on the users list and loads it
    state.sign_in.values_mut().email = "ana@mail.com".to_string();
    state.sign_in.values_mut().password = "abcdef".to_string();
    assert_eq!(state.handle_sign_in(), SubmitOutcome::Started);
    settle(&mut state);
    assert_eq!(state.current_view, AppView::Users);
    assert_eq!(state.user.as_ref().map(|u| u.label().to_string()), Some("Ana Ruiz".to_string()));
    assert!(state.toasts.iter().any(|t| t.message == SIGNED_IN));
    settle(&mut state);
    assert_eq!(state.users.records().len(), 1);

    // Create
    state.users.open_create();
    state.users.form.state.values = fields("Carla", "Gómez", "carla@mail.com");
    assert_eq!(state.users.submit(), SubmitOutcome::Started);
    settle(&mut state);
    assert_eq!(latest_message(&state), Some((ToastKind::Success, USER_ADDED.to_string())));
    assert!(!state.users.modal_open);
    assert_eq!(state.users.records().len(), 2);
    let created = state.users.records()[1].clone();
    assert_eq!(gateway.records(COLLECTION)[1].id, created.id);

    // Edit
    state.users.begin_edit(&created);
    state.users.form.state.values.last_name = "Pérez".to_string();
    assert_eq!(state.users.submit(), SubmitOutcome::Started);
    settle(&mut state);
    assert_eq!(latest_message(&state), Some((ToastKind::Success, USER_UPDATED.to_string())));
    assert_eq!(state.users.records()[1].fields.last_name, "Pérez");
    assert_eq!(gateway.records(COLLECTION)[1].fields.last_name, "Pérez");

    // Search
    state.users.search_query = "CAR".to_string();
    let visible: Vec<String> = state.users.visible().iter().map(|r| r.id.clone()).collect();
    assert_eq!(visible, vec![created.id.clone()]);
    state.users.search_query.clear();
    assert_eq!(state.users.visible().len(), 2);

    // Delete
    assert!(state.users.remove("seed-1"));
    settle(&mut state);
    assert_eq!(latest_message(&state), Some((ToastKind::Success, USER_DELETED.to_string())));
    assert_eq!(state.users.records().len(), 1);
    assert_eq!(gateway.records(COLLECTION).len(), 1);

    // The list was only fetched once
    assert_eq!(gateway.calls().list, 1);
}

#[test]
fn test_invalid_record_never_reaches_gateway() {
    let gateway = Arc::new(InMemoryGateway::new());
    let mut screen = UsersScreen::new(gateway.clone(), COLLECTION);
    screen.open_create();
    screen.form.state.values = fields("Ana", "Ruiz", "ana@mail.com");
    screen.form.state.values.password = "123".to_string();

    assert_eq!(screen.submit(), SubmitOutcome::Invalid);
    assert_eq!(
        screen.form.state.validation_errors.get(Field::Password),
        Some(RECORD_PASSWORD_TOO_SHORT)
    );
    assert!(screen.modal_open);
    assert_eq!(gateway.calls().total(), 0);
}

#[test]
fn test_delete_of_vanished_record_keeps_cache() {
    let gateway = Arc::new(InMemoryGateway::new().with_records(COLLECTION, vec![record("a", "Ana")]));
    let mut screen = UsersScreen::new(gateway.clone(), COLLECTION);
    let mut toasts = Toasts::new();
    screen.mount();
    screen.wait(&mut toasts);

    gateway.fail_next(GatewayError::not_found("a"));
    assert!(screen.remove("a"));
    screen.wait(&mut toasts);

    assert_eq!(screen.records().len(), 1);
    assert_eq!(toasts.latest().map(|t| t.message.as_str()), Some(DELETE_FAILED));
    assert!(screen.last_error().is_some_and(GatewayError::is_not_found));
}

#[test]
fn test_logout_returns_to_auth_and_forgets_records() {
    let gateway = Arc::new(
        InMemoryGateway::new()
            .with_account("ana@mail.com", "abcdef")
            .with_records(COLLECTION, vec![record("a", "Ana")]),
    );
    let mut state = app(&gateway);
    state.sign_in.values_mut().email = "ana@mail.com".to_string();
    state.sign_in.values_mut().password = "abcdef".to_string();
    state.handle_sign_in();
    settle(&mut state);
    settle(&mut state);
    assert_eq!(state.users.records().len(), 1);

    state.logout();
    assert_eq!(state.current_view, AppView::Auth);
    assert!(state.users.records().is_empty());
    assert!(gateway.session().is_none());
}
