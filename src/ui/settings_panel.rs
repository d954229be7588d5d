//! Settings panel for profile, notifications, security, and data management.

use eframe::egui::{self, RichText};
use egui_phosphor::regular::{BELL, DATABASE, LOCK, TRASH, USER};

use super::app::{App, DeleteTarget};
use super::components::{colors, panel_header};
use crate::error::{AppError, Result};

/// Password change fields. Never persisted.
#[derive(Clone, Debug, Default)]
pub struct SecurityForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl SecurityForm {
    /// Local checks before a change could be sent anywhere.
    pub fn validate(&self) -> Result<()> {
        if self.current_password.is_empty() {
            return Err(AppError::validation("Current password is required"));
        }
        if self.new_password.is_empty() {
            return Err(AppError::validation("New password is required"));
        }
        if self.new_password != self.confirm_password {
            return Err(AppError::validation("New passwords do not match"));
        }
        Ok(())
    }
}

/// Show the settings panel.
pub fn show(app: &mut App, ui: &mut egui::Ui) {
    panel_header(ui, "Settings", "Manage your account and application preferences");

    // Profile
    ui.group(|ui| {
        ui.heading(format!("{USER} Profile"));
        ui.add_space(5.0);

        let (username, role) = app
            .session
            .current_user()
            .map(|u| (u.username.clone(), u.role.as_str().to_string()))
            .unwrap_or_default();

        egui::Grid::new("profile_settings_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Username:");
                ui.add_enabled(false, egui::TextEdit::singleline(&mut username.as_str()));
                ui.end_row();

                ui.label("Role:");
                ui.add_enabled(false, egui::TextEdit::singleline(&mut role.as_str()));
                ui.end_row();

                ui.label("Email:");
                if ui
                    .add(egui::TextEdit::singleline(&mut app.config.ui.contact_email).hint_text("admin@school.edu"))
                    .changed()
                {
                    app.config_modified = true;
                }
                ui.end_row();

                ui.label("School name:");
                if ui.text_edit_singleline(&mut app.config.school.name).changed() {
                    app.config_modified = true;
                }
                ui.end_row();
            });
    });

    ui.add_space(15.0);

    // Notifications
    ui.group(|ui| {
        ui.heading(format!("{BELL} Notifications"));
        ui.add_space(5.0);

        let ui_config = &mut app.config.ui;
        let mut changed = false;
        changed |= ui
            .checkbox(&mut ui_config.notify_enrollments, "Email notifications for new enrollments")
            .changed();
        changed |= ui
            .checkbox(&mut ui_config.notify_reports, "Weekly report summaries")
            .changed();
        changed |= ui
            .checkbox(&mut ui_config.notify_system, "System maintenance alerts")
            .changed();
        if changed {
            app.config_modified = true;
        }
    });

    ui.add_space(15.0);

    // Security
    ui.group(|ui| {
        ui.heading(format!("{LOCK} Security"));
        ui.add_space(5.0);

        egui::Grid::new("security_settings_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Current Password:");
                ui.add(egui::TextEdit::singleline(&mut app.security_form.current_password).password(true));
                ui.end_row();

                ui.label("New Password:");
                ui.add(egui::TextEdit::singleline(&mut app.security_form.new_password).password(true));
                ui.end_row();

                ui.label("Confirm Password:");
                ui.add(egui::TextEdit::singleline(&mut app.security_form.confirm_password).password(true));
                ui.end_row();
            });

        ui.add_space(5.0);
        if ui.button("Change Password").clicked() {
            match app.security_form.validate() {
                Ok(()) => {
                    tracing::info!("Password change requested without an identity service");
                    app.security_form = SecurityForm::default();
                    app.error_message =
                        Some("Password changes are handled by the identity service, which is not connected".to_string());
                    app.log_warning("Password change not applied: no identity service");
                }
                Err(e) => app.error_message = Some(e.to_string()),
            }
        }
    });

    ui.add_space(15.0);

    // Data management
    ui.group(|ui| {
        ui.heading(format!("{DATABASE} Data Management"));
        ui.add_space(5.0);

        ui.label(RichText::new("Danger Zone").strong().color(colors::ERROR));
        ui.label(RichText::new(format!("{} student records in memory", app.store.len())).weak());
        ui.add_space(5.0);

        let clear_btn = egui::Button::new(RichText::new(format!("{TRASH} Clear All Data")).color(colors::ERROR));
        if ui.add_enabled(!app.store.is_empty(), clear_btn).clicked() {
            app.request_delete(DeleteTarget::AllStudents);
        }
    });

    ui.add_space(20.0);

    // Action buttons
    ui.horizontal(|ui| {
        let save_btn = egui::Button::new("Save Settings");
        if ui.add_enabled(app.config_modified, save_btn).clicked() {
            app.save_config();
        }

        if app.config_modified {
            ui.label(RichText::new("(unsaved changes)").color(colors::WARNING).italics());
        }

        if ui.button("Reset to Defaults").clicked() {
            app.config = crate::config::AppConfig::default();
            app.config_modified = true;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(current: &str, new: &str, confirm: &str) -> SecurityForm {
        SecurityForm {
            current_password: current.to_string(),
            new_password: new.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_password_change_requires_fields() {
        assert!(form("", "secret", "secret").validate().is_err());
        assert!(form("old", "", "").validate().is_err());
    }

    #[test]
    fn test_password_change_must_match() {
        let err = form("old", "secret", "secrte").validate().unwrap_err();
        assert!(err.to_string().contains("do not match"));
        assert!(form("old", "secret", "secret").validate().is_ok());
    }
}
