//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{AppState, Form, FormError, SubmitStart, View};
use crate::submit::{FormSubmitter, HttpFormSubmitter};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Transport handed to every submission
    submitter: Arc<dyn FormSubmitter>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create an App posting to the configured endpoint
    pub fn new(config: TuiConfig) -> Result<Self> {
        let endpoint = config.endpoint();
        if endpoint.is_none() {
            tracing::warn!("No submission endpoint configured; submissions will fail");
        }
        let submitter = HttpFormSubmitter::new(endpoint, config.submit_timeout())
            .context("Failed to build the HTTP client")?;
        Ok(Self::with_submitter(config, Arc::new(submitter)))
    }

    pub fn with_submitter(config: TuiConfig, submitter: Arc<dyn FormSubmitter>) -> Self {
        Self {
            state: AppState::new(config.debounce()),
            config,
            submitter,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply finished validations and submissions; true if a redraw is due
    pub fn tick(&mut self) -> bool {
        self.state.poll_forms()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let submit_combo = key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SUBMIT_MODIFIER));
        if submit_combo {
            self.submit_active_form();
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(1) => self.switch_view(View::Contact),
            KeyCode::F(2) => self.switch_view(View::Quote),
            KeyCode::Tab => self.state.active_form_mut().next_field(),
            KeyCode::BackTab => self.state.active_form_mut().prev_field(),
            KeyCode::Down => {
                if !self.state.active_form().is_active_field_multiline() {
                    self.state.active_form_mut().next_field();
                }
            }
            KeyCode::Up => {
                if !self.state.active_form().is_active_field_multiline() {
                    self.state.active_form_mut().prev_field();
                }
            }
            KeyCode::Left => self.state.active_form_mut().cycle_option(false),
            KeyCode::Right => self.state.active_form_mut().cycle_option(true),
            KeyCode::Enter => self.handle_enter(),
            KeyCode::Backspace => self.state.active_form_mut().pop_char(),
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.state.active_form_mut().push_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_enter(&mut self) {
        let form = self.state.active_form_mut();
        if form.is_submit_focused() {
            self.submit_active_form();
        } else if form.is_active_field_multiline() {
            form.push_char('\n');
        } else {
            form.next_field();
        }
    }

    fn switch_view(&mut self, view: View) {
        if self.state.current_view != view {
            tracing::debug!("Switching to {} form", view.label());
            self.state.current_view = view;
            self.state.status_message = None;
        }
    }

    /// Run the submit lifecycle on the visible form
    pub fn submit_active_form(&mut self) {
        let submitter = Arc::clone(&self.submitter);
        let message = match self.state.active_form_mut().on_submit(submitter) {
            Ok(SubmitStart::Started) => "Sending...",
            Ok(SubmitStart::Invalid) => "Please fix the highlighted fields",
            Err(FormError::SubmissionInFlight) => "Already sending, please wait",
        };
        self.state.status_message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SubmissionStatus;
    use crate::submit::MockFormSubmitter;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_with(mock: MockFormSubmitter) -> App {
        App::with_submitter(TuiConfig::default(), Arc::new(mock))
    }

    fn silent_app() -> App {
        let mut mock = MockFormSubmitter::new();
        mock.expect_submit().never();
        app_with(mock)
    }

    #[test]
    fn test_escape_quits() {
        let mut app = silent_app();
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_function_keys_switch_forms() {
        let mut app = silent_app();
        app.handle_key(key(KeyCode::F(2)));
        assert_eq!(app.state.current_view, View::Quote);
        app.handle_key(key(KeyCode::F(1)));
        assert_eq!(app.state.current_view, View::Contact);
    }

    #[test]
    fn test_tab_and_arrows_move_focus() {
        let mut app = silent_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state.contact.active_field_index, 1);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.state.contact.active_field_index, 2);
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.state.contact.active_field_index, 0);
    }

    #[tokio::test]
    async fn test_typing_goes_to_focused_field() {
        let mut app = silent_app();
        type_text(&mut app, "Jo");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Diver");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.state.contact.value("firstName"), "Jo");
        assert_eq!(app.state.contact.value("lastName"), "Dive");
        assert_eq!(app.state.contact.active_field_index, 1);
    }

    #[tokio::test]
    async fn test_enter_in_message_inserts_newline() {
        let mut app = silent_app();
        app.state.contact.set_active_field(5);
        type_text(&mut app, "Hi");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "there");
        assert_eq!(app.state.contact.value("message"), "Hi\nthere");
    }

    #[tokio::test]
    async fn test_ctrl_s_on_empty_form_reports_invalid() {
        let mut app = silent_app();
        app.handle_key(ctrl('s'));
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Please fix the highlighted fields")
        );
        assert!(app.state.contact.error("email").is_some());
    }

    #[tokio::test]
    async fn test_submit_button_sends_and_blocks_repeat() {
        let mut mock = MockFormSubmitter::new();
        mock.expect_submit().times(1).returning(|_| Ok(()));
        let mut app = app_with(mock);

        let form = &mut app.state.contact;
        form.on_input_change("firstName", "Jo");
        form.on_input_change("lastName", "Diver");
        form.on_input_change("email", "jo@x.com");
        form.on_input_change("phone", "9045551234");
        form.on_input_change("subject", "Hull");
        form.on_input_change("message", "Need hull cleaned soon");
        form.set_active_field(6);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state.status_message.as_deref(), Some("Sending..."));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.state.status_message.as_deref(),
            Some("Already sending, please wait")
        );

        assert_eq!(app.state.contact.settle().await, SubmissionStatus::Success);
    }

    #[test]
    fn test_switching_view_clears_status_message() {
        let mut app = silent_app();
        app.state.status_message = Some("Sending...".to_string());
        app.handle_key(key(KeyCode::F(2)));
        assert!(app.state.status_message.is_none());
    }
}
