//! Reports panel: aggregate statistics and charts.

use chrono::Local;
use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{CALENDAR, TREND_UP, USERS};

use super::app::App;
use super::components::{bar_chart, card_frame, colors, panel_header, percentage_bar, stat_card, status_color};
use crate::models::student::grade;
use crate::stats::{self, StudentStats};

const RECENT_ENROLLMENTS: usize = 5;

/// Show the reports panel.
pub fn show(app: &App, ui: &mut Ui) {
    panel_header(ui, "Reports", "Student statistics and analytics");

    let records = app.store.list();
    let summary = StudentStats::compute(records, &grade::ALL, Local::now().date_naive());
    let counts = &summary.counts;

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, USERS, "Total Students", &counts.total.to_string(), colors::PRIMARY);
        stat_card(ui, CALENDAR, "Average Age", &summary.average_age.to_string(), colors::ACTIVE);
        stat_card(ui, TREND_UP, "Active Students", &counts.active.to_string(), colors::GRADUATED);
    });

    ui.add_space(20.0);

    let column_width = (ui.available_width() - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(5.0);

        // Students by grade
        ui.vertical(|ui| {
            ui.set_width(column_width);
            card_frame(ui).show(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                ui.label(RichText::new("Students by Grade").strong());
                ui.add_space(10.0);

                let bars: Vec<(&str, usize)> = summary
                    .grades
                    .iter()
                    .map(|g| (grade::short_label(g.grade), g.count))
                    .collect();
                bar_chart(ui, &bars, 220.0, colors::PRIMARY);
            });
        });

        ui.add_space(20.0);

        // Status breakdown
        ui.vertical(|ui| {
            ui.set_width(column_width);
            card_frame(ui).show(ui, |ui| {
                ui.set_min_width(column_width - 30.0);
                ui.label(RichText::new("Student Status Breakdown").strong());
                ui.add_space(10.0);

                for share in &summary.statuses {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("●").color(status_color(share.status)));
                        ui.label(share.status.label());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(format!("{} ({:.1}%)", share.count, share.percentage));
                        });
                    });
                    percentage_bar(ui, share.percentage, status_color(share.status));
                    ui.add_space(8.0);
                }
            });
        });
    });

    ui.add_space(20.0);

    card_frame(ui).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new("Recent Enrollments").strong());
        ui.add_space(10.0);

        let recent = stats::recent_enrollments(records, RECENT_ENROLLMENTS);
        if recent.is_empty() {
            ui.label(RichText::new("No enrollments yet").weak());
            return;
        }

        egui::Grid::new("recent_enrollments_grid")
            .num_columns(3)
            .striped(true)
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                for student in recent {
                    ui.label(RichText::new(student.full_name()).strong());
                    ui.label(RichText::new(format!("{} • {}", student.grade, student.student_id)).weak());
                    ui.vertical(|ui| {
                        ui.label(student.enrollment_date.format("%m/%d/%Y").to_string());
                        ui.label(RichText::new("Enrolled").small().weak());
                    });
                    ui.end_row();
                }
            });
    });
}
