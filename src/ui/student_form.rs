//! Add/edit student form.

use chrono::{Local, NaiveDate};
use eframe::egui::{self, RichText, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{ARROW_LEFT, FLOPPY_DISK};

use super::app::App;
use super::components::{card_frame, colors, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon};
use crate::error::{AppError, Result};
use crate::models::student::{CreateStudent, StudentRecord, StudentStatus, UpdateStudent, grade};
use crate::navigation::View;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse date input flexibly, accepting multiple formats.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Which record the form was loaded for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormTarget {
    Add,
    Edit(String),
}

/// A date typed as text, with the parsed value when valid.
#[derive(Clone, Debug, Default)]
pub struct DateInput {
    pub text: String,
    pub value: Option<NaiveDate>,
}

impl DateInput {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            text: date.format(DATE_FORMAT).to_string(),
            value: Some(date),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.value = parse_flexible_date(&self.text);
    }

    fn is_valid(&self) -> bool {
        self.text.trim().is_empty() || self.value.is_some()
    }
}

/// Student form state.
#[derive(Clone, Debug, Default)]
pub struct StudentForm {
    pub target: Option<FormTarget>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub grade: String,
    pub date_of_birth: DateInput,
    pub phone_number: String,
    pub address: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub enrollment_date: DateInput,
    pub status: StudentStatus,
}

impl StudentForm {
    /// Blank add form, enrollment date defaulting to `today`.
    pub fn add(today: NaiveDate) -> Self {
        Self {
            target: Some(FormTarget::Add),
            enrollment_date: DateInput::from_date(today),
            ..Default::default()
        }
    }

    /// Edit form prefilled from a record.
    pub fn edit(record: &StudentRecord) -> Self {
        Self {
            target: Some(FormTarget::Edit(record.id.clone())),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            student_id: record.student_id.clone(),
            grade: record.grade.clone(),
            date_of_birth: DateInput::from_date(record.date_of_birth),
            phone_number: record.phone_number.clone(),
            address: record.address.clone(),
            guardian_name: record.guardian_name.clone(),
            guardian_phone: record.guardian_phone.clone(),
            enrollment_date: DateInput::from_date(record.enrollment_date),
            status: record.status,
        }
    }

    /// Drop any loaded draft.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.target, Some(FormTarget::Edit(_)))
    }

    /// Check required fields and build the create payload.
    pub fn validate(&self) -> Result<CreateStudent> {
        let required = [
            (&self.first_name, "First name"),
            (&self.last_name, "Last name"),
            (&self.email, "Email"),
            (&self.student_id, "Student ID"),
            (&self.grade, "Grade"),
        ];
        for (value, name) in required {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} is required")));
            }
        }
        if !self.email.contains('@') {
            return Err(AppError::validation("Email address is invalid"));
        }

        let date_of_birth = required_date(&self.date_of_birth, "Date of birth")?;
        let enrollment_date = required_date(&self.enrollment_date, "Enrollment date")?;

        Ok(CreateStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            grade: self.grade.clone(),
            date_of_birth,
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
            guardian_name: self.guardian_name.trim().to_string(),
            guardian_phone: self.guardian_phone.trim().to_string(),
            enrollment_date,
            status: self.status,
        })
    }
}

fn required_date(input: &DateInput, name: &str) -> Result<NaiveDate> {
    if input.text.trim().is_empty() {
        return Err(AppError::validation(format!("{name} is required")));
    }
    input
        .value
        .ok_or_else(|| AppError::validation(format!("{name} must be a date like YYYY-MM-DD")))
}

/// Show the student form for the active add/edit view.
pub fn show(app: &mut App, ui: &mut Ui) {
    let wanted = match (app.nav.active_view(), app.nav.editing_record()) {
        (View::EditStudent, Some(id)) => FormTarget::Edit(id.to_string()),
        (View::EditStudent, None) => {
            app.error_message = Some("Student not found".to_string());
            app.close_student_form();
            return;
        }
        _ => FormTarget::Add,
    };

    if app.student_form.target.as_ref() != Some(&wanted) {
        app.student_form = match &wanted {
            FormTarget::Add => StudentForm::add(Local::now().date_naive()),
            FormTarget::Edit(id) => match app.store.get(id) {
                Some(record) => StudentForm::edit(record),
                None => {
                    tracing::warn!(id = %id, "Edit requested for missing student");
                    app.error_message = Some("Student not found".to_string());
                    app.log_warning(format!("Student {id} no longer exists"));
                    app.close_student_form();
                    return;
                }
            },
        };
    }

    let editing = app.student_form.is_editing();
    if styled_button_with_icon(ui, ARROW_LEFT, "Back to Students").clicked() {
        app.close_student_form();
        return;
    }
    ui.add_space(10.0);

    if editing {
        panel_header(ui, "Edit Student", "Update student information");
    } else {
        panel_header(ui, "Add New Student", "Enter student information");
    }

    card_frame(ui).show(ui, |ui| {
        ui.label(RichText::new("Student Information").strong().size(16.0));
        ui.add_space(10.0);
        show_fields(&mut app.student_form, ui);
    });

    ui.add_space(15.0);

    let mut submit = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        if styled_button(ui, "Cancel").clicked() {
            cancel = true;
        }
        let label = if editing { "Update Student" } else { "Add Student" };
        if primary_button_with_icon(ui, FLOPPY_DISK, label).clicked() {
            submit = true;
        }
    });

    if cancel {
        app.close_student_form();
    } else if submit {
        save_student(app);
    }
}

fn show_fields(form: &mut StudentForm, ui: &mut Ui) {
    egui::Grid::new("student_form_grid")
        .num_columns(4)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("First Name *");
            ui.add(egui::TextEdit::singleline(&mut form.first_name).desired_width(200.0));
            ui.label("Last Name *");
            ui.add(egui::TextEdit::singleline(&mut form.last_name).desired_width(200.0));
            ui.end_row();

            ui.label("Email *");
            ui.add(
                egui::TextEdit::singleline(&mut form.email)
                    .desired_width(200.0)
                    .hint_text("name@school.edu"),
            );
            ui.label("Student ID *");
            ui.add(
                egui::TextEdit::singleline(&mut form.student_id)
                    .desired_width(200.0)
                    .hint_text("STU001"),
            );
            ui.end_row();

            ui.label("Grade *");
            egui::ComboBox::from_id_salt("student_form_grade")
                .width(200.0)
                .selected_text(if form.grade.is_empty() {
                    "Select grade"
                } else {
                    form.grade.as_str()
                })
                .show_ui(ui, |ui| {
                    for g in grade::ALL {
                        if ui.selectable_label(form.grade == g, g).clicked() {
                            form.grade = g.to_string();
                        }
                    }
                });
            ui.label("Date of Birth *");
            date_field(ui, "student_form_dob", &mut form.date_of_birth);
            ui.end_row();

            ui.label("Status");
            egui::ComboBox::from_id_salt("student_form_status")
                .width(200.0)
                .selected_text(form.status.label())
                .show_ui(ui, |ui| {
                    for status in StudentStatus::ALL {
                        ui.selectable_value(&mut form.status, status, status.label());
                    }
                });
            ui.label("Enrollment Date *");
            date_field(ui, "student_form_enrolled", &mut form.enrollment_date);
            ui.end_row();

            ui.label("Phone Number");
            ui.add(egui::TextEdit::singleline(&mut form.phone_number).desired_width(200.0));
            ui.label("Address");
            ui.add(egui::TextEdit::singleline(&mut form.address).desired_width(200.0));
            ui.end_row();

            ui.label("Guardian Name");
            ui.add(egui::TextEdit::singleline(&mut form.guardian_name).desired_width(200.0));
            ui.label("Guardian Phone");
            ui.add(egui::TextEdit::singleline(&mut form.guardian_phone).desired_width(200.0));
            ui.end_row();
        });
}

/// Text date input with a picker next to it.
fn date_field(ui: &mut Ui, id: &str, input: &mut DateInput) {
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            // Red text for invalid input
            let text_color = if input.is_valid() {
                ui.visuals().text_color()
            } else {
                colors::ERROR
            };

            let response = ui.add(
                egui::TextEdit::singleline(&mut input.text)
                    .desired_width(110.0)
                    .hint_text("YYYY-MM-DD")
                    .text_color(text_color),
            );
            if response.changed() {
                input.value = parse_flexible_date(&input.text);
            }

            let before = input.value.unwrap_or_else(|| Local::now().date_naive());
            let mut picked = before;
            ui.add(DatePickerButton::new(&mut picked).id_salt(id));
            if picked != before {
                *input = DateInput::from_date(picked);
            }
        });

        if !input.is_valid() {
            ui.colored_label(colors::ERROR, "Invalid date format");
        }
    });
}

fn save_student(app: &mut App) {
    let data = match app.student_form.validate() {
        Ok(data) => data,
        Err(e) => {
            app.error_message = Some(e.to_string());
            return;
        }
    };

    match app.student_form.target.clone() {
        Some(FormTarget::Edit(id)) => app.update_student(&id, UpdateStudent::from(data)),
        _ => app.create_student(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::app::tests::{render_form, seeded_app};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled() -> StudentForm {
        let mut form = StudentForm::add(date(2024, 8, 15));
        form.first_name = " Ava ".to_string();
        form.last_name = "Martinez".to_string();
        form.email = "ava.martinez@email.com".to_string();
        form.student_id = "STU004".to_string();
        form.grade = grade::NINTH.to_string();
        form.date_of_birth.set_text("2010/02/14");
        form
    }

    #[test]
    fn test_parse_flexible_date() {
        assert_eq!(parse_flexible_date("2024-08-15"), Some(date(2024, 8, 15)));
        assert_eq!(parse_flexible_date("2024/08/15"), Some(date(2024, 8, 15)));
        assert_eq!(parse_flexible_date(" 2024.08.15 "), Some(date(2024, 8, 15)));
        assert_eq!(parse_flexible_date("15-08-2024"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn test_validate_builds_create_payload() {
        let data = filled().validate().unwrap();
        assert_eq!(data.first_name, "Ava");
        assert_eq!(data.date_of_birth, date(2010, 2, 14));
        assert_eq!(data.enrollment_date, date(2024, 8, 15));
        assert_eq!(data.status, StudentStatus::Active);
        assert!(data.phone_number.is_empty());
    }

    #[test]
    fn test_validate_required_fields() {
        let mut form = filled();
        form.student_id = "  ".to_string();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("Student ID"));

        let mut form = filled();
        form.grade.clear();
        assert!(form.validate().is_err());

        let mut form = filled();
        form.date_of_birth.set_text("");
        assert!(form.validate().unwrap_err().to_string().contains("Date of birth is required"));
    }

    #[test]
    fn test_validate_rejects_bad_date_and_email() {
        let mut form = filled();
        form.enrollment_date.set_text("next fall");
        assert!(form.validate().unwrap_err().to_string().contains("Enrollment date"));

        let mut form = filled();
        form.email = "ava.martinez".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_edit_prefills_from_record() {
        let record = StudentRecord::from_create("7".to_string(), filled().validate().unwrap());
        let form = StudentForm::edit(&record);
        assert_eq!(form.target, Some(FormTarget::Edit("7".to_string())));
        assert_eq!(form.date_of_birth.text, "2010-02-14");
        assert_eq!(form.validate().unwrap(), filled().validate().unwrap());
    }

    #[test]
    fn test_edit_draft_discarded_when_leaving_view() {
        let mut app = seeded_app();
        app.edit_student("2");
        render_form(&mut app);
        app.student_form.first_name = "UNSAVED".to_string();

        app.navigate(View::Reports);
        app.navigate(View::Students);
        app.edit_student("2");
        render_form(&mut app);

        assert_eq!(app.store.get("2").unwrap().first_name, "Liam");
        assert_eq!(app.student_form.first_name, "Liam");
    }

    #[test]
    fn test_add_draft_discarded_when_leaving_view() {
        let mut app = seeded_app();
        app.navigate(View::AddStudent);
        render_form(&mut app);
        app.student_form.first_name = "DRAFT".to_string();

        app.navigate(View::Dashboard);
        app.navigate(View::AddStudent);
        render_form(&mut app);

        assert_eq!(app.student_form.target, Some(FormTarget::Add));
        assert_eq!(app.student_form.first_name, "");
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_invalid_submit_leaves_store_untouched() {
        let mut app = seeded_app();
        app.navigate(View::AddStudent);
        render_form(&mut app);
        app.student_form.first_name = "Ava".to_string();

        save_student(&mut app);
        assert!(app.error_message.as_deref().unwrap().contains("Last name is required"));
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.nav.active_view(), View::AddStudent);
    }

    #[test]
    fn test_close_clears_target() {
        let mut form = filled();
        form.close();
        assert!(form.target.is_none());
        assert!(form.first_name.is_empty());
    }
}
