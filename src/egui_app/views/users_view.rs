use eframe::egui;

use crate::egui_app::forms::FormPhase;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::egui_app::views::form_field;
use crate::shared::user::UserRecord;
use crate::shared::validation::Field;

enum RowAction {
    Edit(UserRecord),
    Delete(String),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::Frame::new()
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.users.search_query)
                        .hint_text("Buscar por nombre o ID")
                        .desired_width(280.0),
                );
                if !state.users.search_query.is_empty() && ui.button("Limpiar").clicked() {
                    state.users.search_query.clear();
                }
                if state.users.is_loading() {
                    ui.spinner();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let add = egui::Button::new(egui::RichText::new("Agregar Usuario").color(colors::TEXT_LIGHT))
                        .fill(colors::ACCENT);
                    if ui.add(add).clicked() {
                        state.users.open_create();
                    }
                    if ui.button("Recargar").clicked() {
                        state.users.refresh();
                    }
                });
            });
            ui.add_space(16.0);

            if let Some(action) = render_table(ui, state) {
                match action {
                    RowAction::Edit(record) => state.users.begin_edit(&record),
                    RowAction::Delete(id) => {
                        state.users.remove(&id);
                    }
                }
            }
        });

    if state.users.modal_open {
        render_modal(ui.ctx(), state);
    }
}

fn render_table(ui: &mut egui::Ui, state: &AppState) -> Option<RowAction> {
    // Collect row data first so clicks can mutate the screen afterwards.
    let rows: Vec<UserRecord> = state.users.visible().into_iter().cloned().collect();
    let removing = state.users.removing();
    let mut action = None;

    if rows.is_empty() && !state.users.is_loading() {
        ui.colored_label(colors::TEXT_SECONDARY, "No hay usuarios.");
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("users_grid")
            .striped(true)
            .num_columns(5)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for header in ["ID", "Nombre", "Apellido", "Email", "Acciones"] {
                    ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(header).strong());
                }
                ui.end_row();

                for record in rows {
                    ui.colored_label(colors::TEXT_SECONDARY, &record.id);
                    ui.colored_label(colors::TEXT_LIGHT, &record.fields.first_name);
                    ui.colored_label(colors::TEXT_LIGHT, &record.fields.last_name);
                    ui.colored_label(colors::TEXT_LIGHT, &record.fields.email);
                    ui.horizontal(|ui| {
                        if ui.button("Editar").clicked() {
                            action = Some(RowAction::Edit(record.clone()));
                        }
                        let deleting = removing == Some(record.id.as_str());
                        let delete = egui::Button::new(egui::RichText::new("Eliminar").color(colors::TEXT_LIGHT))
                            .fill(colors::DANGER);
                        if ui.add_enabled(removing.is_none(), delete).clicked() {
                            action = Some(RowAction::Delete(record.id.clone()));
                        }
                        if deleting {
                            ui.spinner();
                        }
                    });
                    ui.end_row();
                }
            });
    });

    action
}

fn render_modal(ctx: &egui::Context, state: &mut AppState) {
    let title = if state.users.editing().is_some() { "Editar Usuario" } else { "Agregar Usuario" };
    let submit_label = if state.users.editing().is_some() { "Actualizar" } else { "Agregar" };
    let submitting = state.users.form.phase() == FormPhase::Submitting;
    let mut save = false;
    let mut cancel = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            let form = &mut state.users.form.state;
            let errors = &form.validation_errors;
            form_field(ui, "Nombre", &mut form.values.first_name, false, errors.get(Field::FirstName));
            form_field(ui, "Apellido", &mut form.values.last_name, false, errors.get(Field::LastName));
            form_field(ui, "Email", &mut form.values.email, false, errors.get(Field::Email));
            form_field(ui, "Password", &mut form.values.password, true, errors.get(Field::Password));

            ui.horizontal(|ui| {
                if ui.add_enabled(!submitting, egui::Button::new("Cancelar")).clicked() {
                    cancel = true;
                }
                let submit = egui::Button::new(egui::RichText::new(submit_label).color(colors::TEXT_LIGHT))
                    .fill(colors::ACCENT);
                if ui.add_enabled(!submitting, submit).clicked() {
                    save = true;
                }
                if submitting {
                    ui.spinner();
                }
            });
        });

    if cancel {
        state.users.cancel_edit();
    } else if save {
        state.users.submit();
    }
}
