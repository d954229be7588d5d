//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod dashboard;
pub mod login_panel;
pub mod reports_panel;
pub mod settings_panel;
pub mod student_form;
pub mod student_list;

pub use app::App;
