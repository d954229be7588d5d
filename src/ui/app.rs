//! Main application state and frame loop.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{CHART_BAR, GEAR, GRADUATION_CAP, HOUSE, SIGN_OUT, USER_PLUS, USERS};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::models::student::{CreateStudent, UpdateStudent};
use crate::models::user::{Credentials, SessionUser};
use crate::navigation::{Navigation, View};
use crate::session::{Authenticator, SessionGate, SessionState};
use crate::store::StudentStore;

use super::components::colors;
use super::login_panel::LoginForm;
use super::settings_panel::SecurityForm;
use super::student_form::StudentForm;
use super::{dashboard, login_panel, reports_panel, settings_panel, student_form, student_list};

/// Messages from background tasks to the UI.
pub enum UiMessage {
    SessionRestored(Option<SessionUser>),
    SignedIn(SessionUser),
    SignInFailed(String),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Target for delete confirmation dialog.
#[derive(Clone, Debug)]
pub enum DeleteTarget {
    Student(String, String),
    AllStudents,
}

const MAX_LOG_MESSAGES: usize = 100;

/// Main application state.
pub struct App {
    // Runtime for authenticator calls
    rt: tokio::runtime::Runtime,
    authenticator: Arc<dyn Authenticator>,

    // Message channel for async communication
    tx: mpsc::UnboundedSender<UiMessage>,
    rx: mpsc::UnboundedReceiver<UiMessage>,

    // Core state
    pub store: StudentStore,
    pub session: SessionGate,
    pub nav: Navigation,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_modified: bool,

    // Forms
    pub login_form: LoginForm,
    pub sign_in_pending: bool,
    pub student_form: StudentForm,
    pub student_search: String,
    pub security_form: SecurityForm,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub show_delete_confirm: bool,
    pub delete_target: Option<DeleteTarget>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        store: StudentStore,
        config: AppConfig,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            authenticator,
            tx,
            rx,
            store,
            session: SessionGate::new(),
            nav: Navigation::new(),
            config,
            config_path,
            config_modified: false,
            login_form: LoginForm::default(),
            sign_in_pending: false,
            student_form: StudentForm::default(),
            student_search: String::new(),
            security_form: SecurityForm::default(),
            log_messages: Vec::new(),
            show_delete_confirm: false,
            delete_target: None,
            error_message: None,
            success_message: None,
        };

        app.restore_session();
        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Ask the authenticator for an existing session.
    fn restore_session(&mut self) {
        let auth = Arc::clone(&self.authenticator);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let restored = tokio::task::spawn_blocking(move || auth.restore())
                .await
                .unwrap_or_else(|e| {
                    tracing::error!("Session restore task failed: {}", e);
                    None
                });
            let _ = tx.send(UiMessage::SessionRestored(restored));
        });
    }

    /// Submit the login form.
    pub fn sign_in(&mut self) {
        if self.sign_in_pending {
            return;
        }
        self.sign_in_pending = true;
        self.login_form.error = None;

        let credentials = Credentials::new(self.login_form.username.trim(), self.login_form.password.clone());
        let auth = Arc::clone(&self.authenticator);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let msg = match tokio::task::spawn_blocking(move || auth.authenticate(&credentials)).await {
                Ok(Ok(user)) => UiMessage::SignedIn(user),
                Ok(Err(e)) => UiMessage::SignInFailed(e.to_string()),
                Err(e) => UiMessage::SignInFailed(format!("Sign-in task failed: {e}")),
            };
            let _ = tx.send(msg);
        });
    }

    /// End the session and reset per-session UI state. Records are kept.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.nav.reset();
        self.student_form.close();
        self.student_search.clear();
        self.security_form = SecurityForm::default();
        self.login_form = LoginForm::default();
        self.show_delete_confirm = false;
        self.delete_target = None;
    }

    /// Navigate via sidebar or quick action.
    ///
    /// Leaving a view discards any unsaved form draft, so the form is
    /// reloaded the next time it is entered.
    pub fn navigate(&mut self, view: View) {
        if self.nav.active_view() != view {
            self.student_form.close();
        }
        self.nav.set_active_view(view);
    }

    /// Open the edit form for a student, loaded fresh from the store.
    pub fn edit_student(&mut self, id: &str) {
        self.student_form.close();
        self.nav.edit(id);
    }

    /// Leave the student form (after save or cancel).
    pub fn close_student_form(&mut self) {
        self.student_form.close();
        self.nav.finish_form();
    }

    /// Create a new student.
    pub fn create_student(&mut self, data: CreateStudent) {
        let record = self.store.create(data);
        let name = record.full_name();
        let grade = record.grade.clone();
        tracing::info!(id = %record.id, "Student added: {}", name);

        self.success_message = Some("Student added successfully!".to_string());
        self.log_success(format!("New student enrolled: {name} joined {grade}"));
        self.close_student_form();
    }

    /// Update an existing student.
    pub fn update_student(&mut self, id: &str, data: UpdateStudent) {
        match self.store.update(id, data) {
            Some(record) => {
                let name = record.full_name();
                tracing::info!(id, "Student updated: {}", name);
                self.success_message = Some("Student updated successfully!".to_string());
                self.log_success(format!("Record updated: {name}"));
            }
            None => {
                tracing::warn!(id, "Update of missing student");
                self.error_message = Some("Student not found".to_string());
                self.log_error(format!("Update failed, student {id} not found"));
            }
        }
        self.close_student_form();
    }

    /// Delete a student.
    pub fn delete_student(&mut self, id: &str, name: &str) {
        if self.store.delete(id) {
            tracing::info!(id, "Student deleted: {}", name);
            self.success_message = Some("Student deleted successfully".to_string());
            self.log_success(format!("Student deleted: {name}"));
        } else {
            self.error_message = Some("Student not found".to_string());
            self.log_error(format!("Delete failed, student {name} not found"));
        }
    }

    /// Delete every student through the store's delete operation.
    pub fn clear_all_students(&mut self) {
        let ids = self.store.ids();
        let count = ids.iter().filter(|id| self.store.delete(id)).count();
        tracing::warn!("Cleared all student data ({} records)", count);

        self.nav.set_editing_record(None);
        self.student_form.close();
        self.success_message = Some(format!("Deleted {count} student records"));
        self.log_warning(format!("All student data cleared ({count} records)"));
    }

    /// Save configuration to file.
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.validate() {
            self.error_message = Some(e.to_string());
            return;
        }
        match self.config.save(&self.config_path) {
            Ok(()) => {
                tracing::info!("Config saved to {:?}", self.config_path);
                self.config_modified = false;
                self.success_message = Some("Settings saved".to_string());
                self.log_success("Settings saved");
            }
            Err(e) => {
                tracing::error!("Failed to save config: {}", e);
                self.error_message = Some(format!("Failed to save settings: {e}"));
                self.log_error(format!("Failed to save settings: {e}"));
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::SessionRestored(user) => {
                    self.session.finish_loading(user);
                }
                UiMessage::SignedIn(user) => {
                    self.sign_in_pending = false;
                    self.login_form.password.clear();
                    self.log_info(format!("Signed in as {}", user.username));
                    self.session.sign_in(user);
                    self.nav.reset();
                }
                UiMessage::SignInFailed(e) => {
                    self.sign_in_pending = false;
                    tracing::warn!("Sign-in failed: {}", e);
                    self.login_form.error = Some(e);
                }
            }
        }
    }

    /// Render the navigation sidebar.
    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(210.0)
            .show(ctx, |ui| {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(GRADUATION_CAP).size(26.0).color(colors::PRIMARY));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&self.config.school.name).strong());
                        ui.label(RichText::new("Student Management").small().weak());
                    });
                });
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                let active = self.nav.active_view();
                for view in View::SIDEBAR {
                    let icon = match view {
                        View::Dashboard => HOUSE,
                        View::Students | View::EditStudent => USERS,
                        View::AddStudent => USER_PLUS,
                        View::Reports => CHART_BAR,
                        View::Settings => GEAR,
                    };
                    let selected = active == view || (view == View::Students && active == View::EditStudent);
                    let button = egui::Button::selectable(selected, format!("{icon}  {}", view.label()))
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(button).clicked() {
                        self.navigate(view);
                    }
                }

                ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
                    ui.add_space(10.0);
                    if ui.button(format!("{SIGN_OUT}  Sign Out")).clicked() {
                        self.sign_out();
                    }
                    if let Some(user) = self.session.current_user() {
                        ui.label(RichText::new(user.role.as_str()).small().weak());
                        ui.label(RichText::new(&user.username).strong());
                    }
                    ui.separator();
                });
            });
    }

    /// Render modal dialogs (error, success, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }

        // Delete confirmation dialog
        if self.show_delete_confirm
            && let Some(target) = self.delete_target.clone()
        {
            let (title, message) = match &target {
                DeleteTarget::Student(_, name) => (
                    "Delete Student",
                    format!("Are you sure you want to delete {name}?"),
                ),
                DeleteTarget::AllStudents => (
                    "Clear All Data",
                    format!(
                        "Delete all {} student records? This cannot be undone.",
                        self.store.len()
                    ),
                ),
            };

            egui::Window::new(title)
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                        if ui.button(RichText::new("Delete").color(colors::ERROR)).clicked() {
                            self.confirm_delete();
                            self.show_delete_confirm = false;
                            self.delete_target = None;
                        }
                    });
                });
        }
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.delete_target = Some(target);
        self.show_delete_confirm = true;
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Student(id, name) => {
                    self.log_info(format!("Deleting student: {name}"));
                    self.delete_student(&id, &name);
                }
                DeleteTarget::AllStudents => {
                    self.clear_all_students();
                }
            }
        }
    }

    /// Show the loading screen.
    fn show_loading(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 2.0 - 30.0);
                    ui.spinner();
                    ui.label("Loading...");
                });
            });
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_ui(ctx);
    }
}

impl App {
    /// Render one frame.
    fn show_ui(&mut self, ctx: &egui::Context) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.session.is_loading() || self.sign_in_pending {
            ctx.request_repaint();
        }

        if self.session.is_loading() {
            self.show_loading(ctx);
            return;
        }

        // Modal dialogs (error, success, delete confirmation)
        self.show_dialogs(ctx);

        if matches!(self.session.state(), SessionState::Unauthenticated) {
            egui::CentralPanel::default().show(ctx, |ui| login_panel::show(self, ui));
            return;
        }

        // Sidebar
        self.show_sidebar(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match self.nav.active_view() {
                    View::Dashboard => {
                        if let Some(next) = dashboard::show(self, ui) {
                            self.navigate(next);
                        }
                    }
                    View::Students => student_list::show(self, ui),
                    View::AddStudent | View::EditStudent => student_form::show(self, ui),
                    View::Reports => reports_panel::show(self, ui),
                    View::Settings => settings_panel::show(self, ui),
                });
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::student::StudentStatus;
    use crate::seed;
    use crate::session::StubAuthenticator;
    use chrono::NaiveDate;

    /// App over the built-in seed records, signed in as admin.
    pub(crate) fn seeded_app() -> App {
        let store = StudentStore::from_records(seed::default_records().unwrap());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let config_path = std::env::temp_dir()
            .join(format!("scholar-records-app-{}", std::process::id()))
            .join("config.toml");

        let mut app = App::new(
            store,
            AppConfig::default(),
            config_path,
            rt,
            Arc::new(StubAuthenticator::default()),
        );
        app.session.finish_loading(None);
        app
    }

    /// Run one headless frame of the student form.
    pub(crate) fn render_form(app: &mut App) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| student_form::show(app, ui));
        });
    }

    fn new_student() -> CreateStudent {
        CreateStudent {
            first_name: "Ava".to_string(),
            last_name: "Martinez".to_string(),
            email: "ava.martinez@email.com".to_string(),
            student_id: "STU004".to_string(),
            grade: "9th Grade".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 2, 14).unwrap(),
            phone_number: String::new(),
            address: String::new(),
            guardian_name: String::new(),
            guardian_phone: String::new(),
            enrollment_date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
            status: StudentStatus::Active,
        }
    }

    #[test]
    fn test_stale_edit_id_returns_to_list() {
        let mut app = seeded_app();
        app.edit_student("999");
        render_form(&mut app);

        assert_eq!(app.error_message.as_deref(), Some("Student not found"));
        assert_eq!(app.nav.active_view(), View::Students);
        assert!(app.nav.editing_record().is_none());
        assert!(app.student_form.target.is_none());
    }

    #[test]
    fn test_edit_form_loads_stored_record() {
        let mut app = seeded_app();
        app.edit_student("2");
        render_form(&mut app);

        assert!(app.error_message.is_none());
        assert_eq!(app.student_form.first_name, "Liam");
        assert!(app.student_form.is_editing());
    }

    #[test]
    fn test_create_student_returns_to_list() {
        let mut app = seeded_app();
        app.navigate(View::AddStudent);
        app.create_student(new_student());

        assert_eq!(app.store.len(), 4);
        assert_eq!(app.nav.active_view(), View::Students);
        assert!(app.nav.editing_record().is_none());
        assert!(app.success_message.is_some());
        assert_eq!(app.log_messages.last().unwrap().level, LogLevel::Success);
    }

    #[test]
    fn test_update_missing_student_reports_error() {
        let mut app = seeded_app();
        app.edit_student("999");
        app.update_student("999", UpdateStudent::status(StudentStatus::Graduated));

        assert_eq!(app.error_message.as_deref(), Some("Student not found"));
        assert!(app.success_message.is_none());
        assert_eq!(app.nav.active_view(), View::Students);
        assert!(app.nav.editing_record().is_none());
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_update_student_applies_changes() {
        let mut app = seeded_app();
        app.edit_student("2");
        app.update_student("2", UpdateStudent::status(StudentStatus::Graduated));

        assert_eq!(app.store.get("2").unwrap().status, StudentStatus::Graduated);
        assert!(app.error_message.is_none());
        assert_eq!(app.nav.active_view(), View::Students);
    }

    #[test]
    fn test_delete_missing_student_reports_error() {
        let mut app = seeded_app();
        app.delete_student("999", "Nobody");

        assert_eq!(app.error_message.as_deref(), Some("Student not found"));
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_confirmed_delete_removes_student() {
        let mut app = seeded_app();
        app.request_delete(DeleteTarget::Student("1".to_string(), "Emma Johnson".to_string()));
        assert!(app.show_delete_confirm);

        app.confirm_delete();
        assert!(app.store.get("1").is_none());
        assert!(app.delete_target.is_none());
    }

    #[test]
    fn test_clear_all_students() {
        let mut app = seeded_app();
        app.edit_student("3");
        app.clear_all_students();

        assert!(app.store.is_empty());
        assert!(app.nav.editing_record().is_none());
        assert_eq!(app.success_message.as_deref(), Some("Deleted 3 student records"));
    }

    #[test]
    fn test_sign_out_resets_navigation_keeps_records() {
        let mut app = seeded_app();
        app.session.sign_in(StubAuthenticator::default().authenticate(&Credentials::default()).unwrap());
        app.edit_student("2");

        app.sign_out();
        assert_eq!(app.session.state(), &SessionState::Unauthenticated);
        assert_eq!(app.nav.active_view(), View::Dashboard);
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_startup_error_shown_on_login_screen() {
        let mut app = seeded_app();
        app.error_message = Some("Config invalid, using defaults".to_string());
        assert_eq!(app.session.state(), &SessionState::Unauthenticated);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.show_ui(ctx));

        let shown = ctx.memory(|m| m.area_rect(egui::Id::new("Error")).is_some());
        assert!(shown);
        assert!(app.error_message.is_some());
    }

    #[test]
    fn test_log_is_capped() {
        let mut app = seeded_app();
        for i in 0..(MAX_LOG_MESSAGES + 5) {
            app.log_info(format!("entry {i}"));
        }
        assert_eq!(app.log_messages.len(), MAX_LOG_MESSAGES);
        assert_eq!(app.log_messages[0].message, "entry 5");
    }
}
