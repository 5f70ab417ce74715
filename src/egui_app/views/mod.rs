use eframe::egui;

use crate::egui_app::notify::ToastKind;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub mod auth_view;
pub mod users_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Gazi Admin").size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    if state.is_authenticated() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(ref user) = state.user {
                            ui.colored_label(colors::TEXT_LIGHT, user.label());
                        }
                    }
                    if state.config.offline() {
                        ui.colored_label(colors::ACCENT_HOVER, "Offline mode");
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(0));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_view {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Users => users_view::render(ui, state),
        });
}

/// Stack of transient notifications in the bottom-right corner
pub fn render_toasts(ctx: &egui::Context, state: &AppState) {
    if state.toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            for toast in state.toasts.iter() {
                let fill = match toast.kind {
                    ToastKind::Success => colors::SUCCESS,
                    ToastKind::Error => colors::ERROR,
                };
                styles::toast_frame(fill).show(ui, |ui| {
                    ui.colored_label(colors::TEXT_LIGHT, &toast.message);
                });
                ui.add_space(6.0);
            }
        });
}

/// Labeled single-line input with its validation message underneath
pub(crate) fn form_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    password: bool,
    error: Option<&str>,
) {
    ui.label(egui::RichText::new(label).color(colors::TEXT_SECONDARY));
    ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .text_color(colors::TEXT_DARK)
            .desired_width(f32::INFINITY),
    );
    if let Some(message) = error {
        ui.label(egui::RichText::new(message).size(12.0).color(colors::ERROR));
    }
    ui.add_space(8.0);
}
