//! Active view and the record being edited.

/// A console view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Students,
    AddStudent,
    EditStudent,
    Reports,
    Settings,
}

impl View {
    /// Views listed in the sidebar. `EditStudent` is only reached via [`Navigation::edit`].
    pub const SIDEBAR: [View; 5] = [
        View::Dashboard,
        View::Students,
        View::AddStudent,
        View::Reports,
        View::Settings,
    ];

    /// Get the display name for the view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Students => "Students",
            View::AddStudent => "Add Student",
            View::EditStudent => "Edit Student",
            View::Reports => "Reports",
            View::Settings => "Settings",
        }
    }
}

/// Navigation state. No history stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    active: View,
    editing: Option<String>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.active
    }

    /// Switch views. The stored editing identifier is left as is.
    pub fn set_active_view(&mut self, view: View) {
        if self.active != view {
            tracing::debug!(from = self.active.label(), to = view.label(), "Navigate");
        }
        self.active = view;
    }

    /// Identifier of the record being edited, if any.
    pub fn editing_record(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn set_editing_record(&mut self, id: Option<String>) {
        self.editing = id;
    }

    /// Open the edit form for `id`.
    pub fn edit(&mut self, id: impl Into<String>) {
        self.set_editing_record(Some(id.into()));
        self.set_active_view(View::EditStudent);
    }

    /// Leave the student form after a save or a cancel.
    pub fn finish_form(&mut self) {
        self.set_editing_record(None);
        self.set_active_view(View::Students);
    }

    /// Back to the initial state (used on sign-out).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let nav = Navigation::new();
        assert_eq!(nav.active_view(), View::Dashboard);
        assert!(nav.editing_record().is_none());
    }

    #[test]
    fn test_edit_sets_view_and_id() {
        let mut nav = Navigation::new();
        nav.set_active_view(View::Students);
        nav.edit("2");
        assert_eq!(nav.active_view(), View::EditStudent);
        assert_eq!(nav.editing_record(), Some("2"));
    }

    #[test]
    fn test_finish_form_returns_to_students() {
        let mut nav = Navigation::new();
        nav.edit("2");
        nav.finish_form();
        assert_eq!(nav.active_view(), View::Students);
        assert!(nav.editing_record().is_none());

        nav.set_active_view(View::AddStudent);
        nav.finish_form();
        assert_eq!(nav.active_view(), View::Students);
    }

    #[test]
    fn test_set_active_view_keeps_editing_id() {
        let mut nav = Navigation::new();
        nav.edit("3");
        nav.set_active_view(View::Reports);
        assert_eq!(nav.editing_record(), Some("3"));
    }

    #[test]
    fn test_reset() {
        let mut nav = Navigation::new();
        nav.edit("1");
        nav.reset();
        assert_eq!(nav, Navigation::default());
    }

    #[test]
    fn test_sidebar_excludes_edit() {
        assert!(!View::SIDEBAR.contains(&View::EditStudent));
    }
}
