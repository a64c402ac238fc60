//! Application state definitions

use super::forms::WizardForm;
use std::collections::VecDeque;

/// Route of the home destination
pub const HOME_PATH: &str = "/home";

/// Navigation state attached to the home destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HomeState {
    /// True when onboarding was just finished, false for a plain redirect
    pub onboarding: bool,
}

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The onboarding wizard (loading, loaded or failed to load)
    #[default]
    Wizard,
    /// The home destination
    Home(HomeState),
}

impl View {
    /// Route path of the view
    pub fn path(&self) -> &'static str {
        match self {
            View::Wizard => "/onboarding",
            View::Home(_) => HOME_PATH,
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Schema fetch in flight; step rendering is suspended while set
    pub is_loading: bool,
    /// Loaded wizard. `None` until a schema arrives.
    pub form: Option<WizardForm>,
    /// Visible reason the schema could not be loaded
    pub load_error: Option<String>,
    /// Answers are being posted
    pub is_submitting: bool,
    /// Modal error messages, shown oldest first
    pub error_queue: VecDeque<String>,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    /// Reset everything owned by a wizard mount
    pub fn clear_wizard(&mut self) {
        self.is_loading = false;
        self.form = None;
        self.load_error = None;
        self.is_submitting = false;
    }

    /// Whether the loaded wizard may move forward
    pub fn can_proceed(&self) -> bool {
        self.form.as_ref().is_some_and(WizardForm::can_proceed)
    }
}
