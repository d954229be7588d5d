//! Shared UI components.

use eframe::egui::{self, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::student::StudentStatus;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);

    pub const PRIMARY: Color32 = Color32::from_rgb(37, 99, 235);
    pub const ACTIVE: Color32 = Color32::from_rgb(22, 163, 74);
    pub const INACTIVE: Color32 = Color32::from_rgb(202, 138, 4);
    pub const GRADUATED: Color32 = Color32::from_rgb(147, 51, 234);
}

/// Badge/bar color for a status.
pub fn status_color(status: StudentStatus) -> Color32 {
    match status {
        StudentStatus::Active => colors::ACTIVE,
        StudentStatus::Inactive => colors::INACTIVE,
        StudentStatus::Graduated => colors::GRADUATED,
    }
}

/// Render a panel header with title and subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.label(RichText::new(subtitle).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Plain button with a minimum size.
pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(egui::Button::new(text).min_size(egui::vec2(80.0, 28.0)))
}

/// Plain button with a leading icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(egui::Button::new(format!("{icon} {text}")).min_size(egui::vec2(80.0, 28.0)))
}

/// Filled primary button with a leading icon (icon may be empty).
pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        egui::Button::new(RichText::new(label).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(90.0, 28.0)),
    )
}

/// Small icon-only row action.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).color(colors::PRIMARY)).small())
        .on_hover_text(tooltip)
}

/// Small icon-only destructive row action.
pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(egui::Button::new(RichText::new(icon).color(colors::ERROR)).small())
        .on_hover_text(tooltip)
}

/// Colored status pill.
pub fn status_badge(ui: &mut Ui, status: StudentStatus) {
    egui::Frame::new()
        .fill(status_color(status).gamma_multiply(0.2))
        .inner_margin(Margin::symmetric(8, 2))
        .corner_radius(CornerRadius::same(10))
        .show(ui, |ui| {
            ui.label(RichText::new(status.as_str()).small().color(status_color(status)));
        });
}

/// Card frame used for stat tiles and sections.
pub fn card_frame(ui: &Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
}

/// Stat tile: icon, title, big colored value.
pub fn stat_card(ui: &mut Ui, icon: &str, title: &str, value: &str, color: Color32) {
    card_frame(ui).show(ui, |ui| {
        ui.set_min_width(170.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).size(28.0).strong().color(color));
            });
            ui.add_space(10.0);
            ui.label(RichText::new(icon).size(28.0).color(color));
        });
    });
}

/// Horizontal progress bar showing `percentage` (0-100).
pub fn percentage_bar(ui: &mut Ui, percentage: f64, color: Color32) {
    let width = ui.available_width().max(50.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 8.0), Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 4.0, ui.visuals().faint_bg_color);
        let fraction = (percentage / 100.0).clamp(0.0, 1.0) as f32;
        if fraction > 0.0 {
            let mut filled = rect;
            filled.set_width(rect.width() * fraction);
            painter.rect_filled(filled, 4.0, color);
        }
    }
}

/// Vertical bar chart of labelled counts.
pub fn bar_chart(ui: &mut Ui, bars: &[(&str, usize)], height: f32, color: Color32) {
    let width = ui.available_width().max(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
    if !ui.is_rect_visible(rect) || bars.is_empty() {
        return;
    }

    let painter = ui.painter();
    let visuals = ui.visuals();
    let max = bars.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1) as f32;

    let label_height = 20.0;
    let plot = egui::Rect::from_min_max(rect.min, egui::pos2(rect.max.x, rect.max.y - label_height));
    painter.rect_stroke(plot, 0.0, visuals.widgets.noninteractive.bg_stroke, StrokeKind::Inside);

    let slot = plot.width() / bars.len() as f32;
    let bar_width = slot * 0.6;

    for (i, (label, count)) in bars.iter().enumerate() {
        let center_x = plot.left() + slot * (i as f32 + 0.5);
        let bar_height = (plot.height() - 16.0) * (*count as f32 / max);
        let bar = egui::Rect::from_min_max(
            egui::pos2(center_x - bar_width / 2.0, plot.bottom() - bar_height),
            egui::pos2(center_x + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(bar, CornerRadius { nw: 4, ne: 4, sw: 0, se: 0 }, color);

        painter.text(
            egui::pos2(center_x, bar.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            count.to_string(),
            egui::FontId::proportional(12.0),
            visuals.text_color(),
        );
        painter.text(
            egui::pos2(center_x, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            *label,
            egui::FontId::proportional(12.0),
            visuals.weak_text_color(),
        );
    }
}
