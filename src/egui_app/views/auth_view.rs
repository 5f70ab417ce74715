use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::form_field;
use crate::shared::validation::Field;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(available_rect, 0.0, colors::BG_DARK);

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if state.is_signup_mode { 520.0 } else { 380.0 };
            let top_space = (available_rect.height() - total_height).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.set_max_width(360.0);
            styles::card_frame().show(ui, |ui| {
                ui.label(
                    egui::RichText::new(if state.is_signup_mode { "Create Account" } else { "Sign In" })
                        .size(26.0)
                        .strong()
                        .color(colors::TEXT_DARK),
                );
                ui.label(
                    egui::RichText::new(if state.is_signup_mode {
                        "Fill in your details to get started"
                    } else {
                        "Enter your email and password to access your account"
                    })
                    .color(colors::TEXT_SECONDARY),
                );
                ui.add_space(16.0);

                if state.is_signup_mode {
                    render_sign_up(ui, state);
                } else {
                    render_sign_in(ui, state);
                }

                ui.add_space(12.0);
                let toggle = if state.is_signup_mode {
                    "Already have an account? Sign in"
                } else {
                    "Don't have an account? Sign up"
                };
                if ui.link(toggle).clicked() {
                    state.toggle_auth_mode();
                }
            });
        });
    });
}

fn render_sign_in(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.sign_in.form.state;
    form_field(ui, "Email address", &mut form.values.email, false, form.validation_errors.get(Field::Email));
    form_field(ui, "Password", &mut form.values.password, true, form.validation_errors.get(Field::Password));

    let submitting = form.is_submitting;
    if submit_button(ui, "Sign in", submitting) {
        state.handle_sign_in();
    }
}

fn render_sign_up(ui: &mut egui::Ui, state: &mut AppState) {
    let form = &mut state.sign_up.form.state;
    let errors = &form.validation_errors;
    form_field(ui, "First name", &mut form.values.first_name, false, errors.get(Field::FirstName));
    form_field(ui, "Last name", &mut form.values.last_name, false, errors.get(Field::LastName));
    form_field(ui, "Email", &mut form.values.email, false, errors.get(Field::Email));
    form_field(ui, "Password", &mut form.values.password, true, errors.get(Field::Password));
    form_field(
        ui,
        "Confirm password",
        &mut form.values.confirm_password,
        true,
        errors.get(Field::ConfirmPassword),
    );

    let submitting = form.is_submitting;
    if submit_button(ui, "Sign up", submitting) {
        state.handle_sign_up();
    }
}

/// Full-width submit button, disabled with a spinner while submitting
fn submit_button(ui: &mut egui::Ui, label: &str, submitting: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        let button = egui::Button::new(egui::RichText::new(label).color(colors::TEXT_LIGHT))
            .fill(colors::ACCENT)
            .min_size(egui::vec2(ui.available_width() - 32.0, 32.0));
        clicked = ui.add_enabled(!submitting, button).clicked();
        if submitting {
            ui.spinner();
        }
    });
    clicked
}
