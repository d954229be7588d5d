//! Dashboard panel with stats, grade distribution, quick actions, and activity log.

use chrono::Local;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{CHECK_CIRCLE, GRADUATION_CAP, USERS, X_CIRCLE};

use super::app::{App, LogLevel};
use super::components::{card_frame, colors, panel_header, percentage_bar, stat_card};
use crate::models::student::grade;
use crate::navigation::View;
use crate::stats::StudentStats;

/// Show the dashboard panel.
///
/// Returns `Some(view)` if navigation is requested.
pub fn show(app: &App, ui: &mut Ui) -> Option<View> {
    let mut next_view = None;

    let greeting = app
        .session
        .current_user()
        .map(|u| format!("Welcome back, {}", u.username))
        .unwrap_or_else(|| "Welcome back".to_string());
    panel_header(ui, "Dashboard", &greeting);

    let summary = StudentStats::compute(app.store.list(), &grade::DASHBOARD, Local::now().date_naive());
    let counts = &summary.counts;

    // Stat cards row
    ui.horizontal_wrapped(|ui| {
        stat_card(ui, USERS, "Total Students", &counts.total.to_string(), colors::PRIMARY);
        stat_card(ui, CHECK_CIRCLE, "Active Students", &counts.active.to_string(), colors::ACTIVE);
        stat_card(ui, X_CIRCLE, "Inactive Students", &counts.inactive.to_string(), colors::INACTIVE);
        stat_card(ui, GRADUATION_CAP, "Graduated", &counts.graduated.to_string(), colors::GRADUATED);
    });

    ui.add_space(20.0);

    // Two-column layout: Recent Activity | Grade Distribution
    let column_width = (ui.available_width() - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(5.0);

        ui.vertical(|ui| {
            ui.set_width(column_width);
            card_frame(ui).show(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                ui.label(RichText::new("Recent Activity").strong());
                ui.add_space(10.0);

                ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                    if app.log_messages.is_empty() {
                        ui.label(RichText::new("No recent activity").weak());
                    } else {
                        for entry in app.log_messages.iter().rev().take(10) {
                            let color = match entry.level {
                                LogLevel::Info => Color32::GRAY,
                                LogLevel::Success => colors::SUCCESS,
                                LogLevel::Warning => colors::WARNING,
                                LogLevel::Error => colors::ERROR,
                            };

                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                        .small()
                                        .color(Color32::DARK_GRAY),
                                );
                                ui.label(RichText::new(&entry.message).color(color));
                            });
                        }
                    }
                });
            });
        });

        ui.add_space(20.0);

        ui.vertical(|ui| {
            ui.set_width(column_width);
            card_frame(ui).show(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                ui.label(RichText::new("Grade Distribution").strong());
                ui.add_space(10.0);

                for entry in &summary.grades {
                    ui.horizontal(|ui| {
                        ui.label(entry.grade);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(format!("{} students", entry.count)).weak());
                        });
                    });
                    percentage_bar(ui, entry.percentage, colors::PRIMARY);
                    ui.add_space(8.0);
                }
            });
        });
    });

    ui.add_space(20.0);

    card_frame(ui).show(ui, |ui| {
        ui.label(RichText::new("Quick Actions").strong());
        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Add Student").clicked() {
                next_view = Some(View::AddStudent);
            }
            ui.add_space(5.0);
            if ui.button("View Students").clicked() {
                next_view = Some(View::Students);
            }
            ui.add_space(5.0);
            if ui.button("Reports").clicked() {
                next_view = Some(View::Reports);
            }
        });
    });

    next_view
}
