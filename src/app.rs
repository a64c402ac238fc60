//! Application state and core logic

use crate::api::{ApiError, OnboardingApi};
use crate::state::{AppState, FieldKind, FormSchema, HomeState, View, WizardButton, WizardForm};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Shown when a submission fails without a server message
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while saving your data.";

/// Shown while the current step has unfilled required fields
pub const INCOMPLETE_STEP_MESSAGE: &str = "Please fill all the required fields before proceeding.";

/// Completion of a background request, tagged with the mount that issued it
#[derive(Debug)]
pub enum AppEvent {
    FormLoaded(u64, Result<FormSchema, ApiError>),
    Submitted(u64, Result<(), ApiError>),
}

/// Sends the outcome of a request exactly once.
///
/// If the task is aborted or panics before `finish` is called, the guard
/// reports `ApiError::Interrupted` from `Drop` so the issuer always hears back.
struct CompletionGuard<T> {
    tx: UnboundedSender<AppEvent>,
    mount_id: u64,
    make_event: fn(u64, Result<T, ApiError>) -> AppEvent,
    done: bool,
}

impl<T> CompletionGuard<T> {
    fn new(
        tx: UnboundedSender<AppEvent>,
        mount_id: u64,
        make_event: fn(u64, Result<T, ApiError>) -> AppEvent,
    ) -> Self {
        Self {
            tx,
            mount_id,
            make_event,
            done: false,
        }
    }

    fn finish(mut self, result: Result<T, ApiError>) {
        self.done = true;
        // Receiver gone means the app is shutting down
        let _ = self.tx.send((self.make_event)(self.mount_id, result));
    }
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        if !self.done {
            let _ = self
                .tx
                .send((self.make_event)(self.mount_id, Err(ApiError::Interrupted)));
        }
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Onboarding backend
    api: Arc<dyn OnboardingApi>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Id of the live wizard mount; results from any other mount are dropped
    active_mount: Option<u64>,
    next_mount_id: u64,
    load_task: Option<JoinHandle<()>>,
    submit_task: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance. Call [`App::mount`] to start loading the wizard.
    pub fn new(api: Arc<dyn OnboardingApi>) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            events_tx,
            events_rx,
            active_mount: None,
            next_mount_id: 0,
            load_task: None,
            submit_task: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.dismount();
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    // Wizard lifecycle

    /// Enter the wizard and fetch its form definition (one request per mount)
    pub fn mount(&mut self) {
        self.dismount();

        let mount_id = self.next_mount_id;
        self.next_mount_id += 1;
        self.active_mount = Some(mount_id);
        self.state.current_view = View::Wizard;
        self.state.is_loading = true;

        tracing::info!("Loading onboarding form");
        let api = Arc::clone(&self.api);
        let guard = CompletionGuard::new(self.events_tx.clone(), mount_id, AppEvent::FormLoaded);
        self.load_task = Some(tokio::spawn(async move {
            let result = api.fetch_form().await;
            guard.finish(result);
        }));
    }

    /// Leave the wizard: cancel in-flight requests and drop its state
    pub fn dismount(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        if let Some(task) = self.submit_task.take() {
            task.abort();
        }
        self.active_mount = None;
        self.state.clear_wizard();
    }

    fn is_current_mount(&self, mount_id: u64) -> bool {
        self.active_mount == Some(mount_id)
    }

    /// Go to the home destination, leaving the wizard
    pub fn navigate_home(&mut self, home: HomeState) {
        self.dismount();
        self.state.status_message = None;
        self.state.current_view = View::Home(home);
        tracing::info!(
            path = self.state.current_view.path(),
            onboarding = home.onboarding,
            "Navigated"
        );
    }

    // Background completions

    /// Apply every completion that has arrived since the last tick
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FormLoaded(mount_id, result) => {
                if !self.is_current_mount(mount_id) {
                    tracing::debug!(mount_id, "Dropping form load for a stale mount");
                    return;
                }
                self.load_task = None;
                self.apply_form_loaded(result);
            }
            AppEvent::Submitted(mount_id, result) => {
                if !self.is_current_mount(mount_id) {
                    tracing::debug!(mount_id, "Dropping submission result for a stale mount");
                    return;
                }
                self.submit_task = None;
                self.apply_submitted(result);
            }
        }
    }

    fn apply_form_loaded(&mut self, result: Result<FormSchema, ApiError>) {
        self.state.is_loading = false;

        match result {
            Ok(schema) => {
                tracing::info!(steps = schema.step_count(), "Onboarding form loaded");
                for field in schema.steps.iter().flatten() {
                    if let FieldKind::Unknown(kind) = &field.kind {
                        tracing::warn!("Unknown field type: {kind} (field {})", field.name);
                    }
                }
                self.state.form = Some(WizardForm::new(schema));
            }
            Err(ApiError::AlreadyOnboarded) => {
                tracing::info!("Onboarding already completed, redirecting home");
                self.navigate_home(HomeState { onboarding: false });
            }
            Err(err) => {
                tracing::error!("Failed to load onboarding form: {err}");
                let message = match err.server_message() {
                    Some(detail) => format!("Could not load the onboarding form: {detail}"),
                    None => format!("Could not load the onboarding form: {err}"),
                };
                self.state.load_error = Some(message);
            }
        }
    }

    fn apply_submitted(&mut self, result: Result<(), ApiError>) {
        self.state.is_submitting = false;
        self.state.status_message = None;

        match result {
            Ok(()) => {
                tracing::info!("Onboarding saved");
                self.navigate_home(HomeState { onboarding: true });
            }
            Err(err) => {
                tracing::error!("Failed to save onboarding: {err}");
                let message = err.server_message().unwrap_or(SUBMIT_FAILED_MESSAGE).to_string();
                self.push_error(message);
            }
        }
    }

    // Navigation within the wizard

    /// Next, or Finish on the last step. Ignored while the step is incomplete.
    fn proceed(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        if !form.can_proceed() {
            return;
        }
        if form.is_last_step() {
            self.submit();
        } else {
            form.advance();
        }
    }

    /// Post the collected answers. A second submission waits for the first.
    fn submit(&mut self) {
        if self.state.is_submitting {
            return;
        }
        let (Some(form), Some(mount_id)) = (self.state.form.as_ref(), self.active_mount) else {
            return;
        };
        if !form.is_last_step() || !form.can_proceed() {
            return;
        }

        let payload = form.submission();
        tracing::info!(answers = payload.steps.len(), "Submitting onboarding answers");
        self.state.is_submitting = true;
        self.state.status_message = Some("Saving…".to_string());

        let api = Arc::clone(&self.api);
        let guard = CompletionGuard::new(self.events_tx.clone(), mount_id, AppEvent::Submitted);
        self.submit_task = Some(tokio::spawn(async move {
            let result = api.submit(payload).await;
            guard.finish(result);
        }));
    }

    // Key handling

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        match self.state.current_view {
            View::Home(_) => self.handle_home_key(key),
            View::Wizard if self.state.is_loading => {}
            // Answers and step are frozen until the save resolves
            View::Wizard if self.state.is_submitting => {}
            View::Wizard if self.state.load_error.is_some() => self.handle_load_failed_key(key),
            View::Wizard => self.handle_wizard_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
            self.quit();
        }
    }

    fn handle_load_failed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.mount(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.form.as_ref() else {
            return;
        };
        let on_buttons = form.is_buttons_row_active();

        let wants_proceed = match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Enter => on_buttons && form.selected_button == WizardButton::Proceed,
            _ => false,
        };
        if wants_proceed {
            self.proceed();
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.prev_field(),
            KeyCode::Esc => form.retreat(),
            KeyCode::Left | KeyCode::Right if on_buttons => form.toggle_button(),
            // Only Back is left once Proceed was handled above
            KeyCode::Enter if on_buttons => form.retreat(),
            _ if on_buttons => {}
            _ => Self::handle_field_key(form, key),
        }
    }

    /// Edit the focused field
    fn handle_field_key(form: &mut WizardForm, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        let Some(kind) = form.active_field().map(|f| f.kind.clone()) else {
            return;
        };

        match kind {
            FieldKind::Text | FieldKind::MultilineText => match key.code {
                KeyCode::Char(c) => form.push_char(c),
                KeyCode::Backspace => form.pop_char(),
                KeyCode::Enter if kind.is_multiline() => form.push_char('\n'),
                KeyCode::Enter => form.next_field(),
                _ => {}
            },
            FieldKind::YesNo => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => form.toggle_active_flag(),
                KeyCode::Char('y') | KeyCode::Char('Y') => form.set_active_flag(true),
                KeyCode::Char('n') | KeyCode::Char('N') => form.set_active_flag(false),
                _ => {}
            },
            FieldKind::Unknown(_) => {}
        }
    }
}
