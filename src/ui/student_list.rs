//! Student list with search, edit and delete.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{MAGNIFYING_GLASS, PENCIL, TRASH, USER_PLUS};

use super::app::{App, DeleteTarget};
use super::components::{action_button, danger_action_button, panel_header, primary_button_with_icon, status_badge, styled_button};
use crate::navigation::View;

enum RowAction {
    Edit(String),
    Delete(String, String),
}

/// Show the student list.
pub fn show(app: &mut App, ui: &mut Ui) {
    panel_header(ui, "Students", "Manage student records and information");

    ui.horizontal(|ui| {
        ui.label(MAGNIFYING_GLASS);
        ui.add(
            egui::TextEdit::singleline(&mut app.student_search)
                .desired_width(260.0)
                .hint_text("Search students..."),
        );
        if !app.student_search.is_empty() && styled_button(ui, "Clear").clicked() {
            app.student_search.clear();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button_with_icon(ui, USER_PLUS, "Add Student").clicked() {
                app.navigate(View::AddStudent);
            }
        });
    });

    ui.add_space(10.0);

    if let Some(action) = show_table(app, ui) {
        match action {
            RowAction::Edit(id) => app.edit_student(&id),
            RowAction::Delete(id, name) => app.request_delete(DeleteTarget::Student(id, name)),
        }
    }
}

fn show_table(app: &App, ui: &mut Ui) -> Option<RowAction> {
    let filtered: Vec<_> = app
        .store
        .list()
        .iter()
        .filter(|s| s.matches_search(&app.student_search))
        .collect();

    ui.label(format!("{} of {} students", filtered.len(), app.store.len()));
    ui.add_space(10.0);

    if filtered.is_empty() {
        ui.add_space(30.0);
        ui.vertical_centered(|ui| {
            let message = if app.store.is_empty() {
                "No students enrolled yet. Add your first student to get started."
            } else {
                "No students match your search."
            };
            ui.label(RichText::new(message).weak());
        });
        return None;
    }

    let mut action = None;
    egui::Grid::new("students_grid")
        .num_columns(7)
        .striped(true)
        .min_col_width(60.0)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            // Header
            ui.strong("Student ID");
            ui.strong("Name");
            ui.strong("Email");
            ui.strong("Grade");
            ui.strong("Phone");
            ui.strong("Status");
            ui.strong("Actions");
            ui.end_row();

            for student in filtered {
                ui.label(&student.student_id);
                ui.label(student.full_name());
                ui.label(&student.email);
                ui.label(&student.grade);
                ui.label(if student.phone_number.is_empty() {
                    "-"
                } else {
                    student.phone_number.as_str()
                });
                status_badge(ui, student.status);

                ui.horizontal(|ui| {
                    if action_button(ui, PENCIL, "Edit").clicked() {
                        action = Some(RowAction::Edit(student.id.clone()));
                    }
                    ui.add_space(4.0);
                    if danger_action_button(ui, TRASH, "Delete").clicked() {
                        action = Some(RowAction::Delete(student.id.clone(), student.full_name()));
                    }
                });

                ui.end_row();
            }
        });

    action
}
