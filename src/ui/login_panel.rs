//! Sign-in screen shown while no session exists.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{GRADUATION_CAP, SIGN_IN};

use super::app::App;
use super::components::{card_frame, colors, primary_button_with_icon};

/// Login form state.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

/// Show the login panel.
pub fn show(app: &mut App, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() / 2.0 - 180.0).max(20.0));

        ui.label(RichText::new(GRADUATION_CAP).size(48.0).color(colors::PRIMARY));
        ui.heading(RichText::new(&app.config.school.name).size(26.0));
        ui.label(RichText::new("Sign in to manage student records").weak());
        ui.add_space(20.0);

        card_frame(ui).show(ui, |ui| {
            ui.set_width(320.0);

            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing([15.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Username:");
                    ui.add(
                        egui::TextEdit::singleline(&mut app.login_form.username)
                            .desired_width(200.0)
                            .hint_text("admin"),
                    );
                    ui.end_row();

                    ui.label("Password:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut app.login_form.password)
                            .desired_width(200.0)
                            .password(true),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        app.sign_in();
                    }
                    ui.end_row();
                });

            ui.add_space(15.0);

            if let Some(error) = &app.login_form.error {
                ui.colored_label(colors::ERROR, error);
                ui.add_space(5.0);
            }

            ui.horizontal(|ui| {
                let button = ui.add_enabled_ui(!app.sign_in_pending, |ui| {
                    primary_button_with_icon(ui, SIGN_IN, "Sign In")
                });
                if button.inner.clicked() {
                    app.sign_in();
                }
                if app.sign_in_pending {
                    ui.spinner();
                    ui.label("Signing in...");
                }
            });
        });
    });
}
