//! The registration form application: key handling and the event loop.

use std::sync::Arc;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use regform_lib::{Registration, RegistrationForm, RegistrationService, SubmitOutcome};

use crate::config::Config;
use crate::error::AppError;
use crate::event::{Key, Modifiers};
use crate::focus::{FocusState, FocusTarget};
use crate::terminal::Terminal;
use crate::text_input::{TextEditResult, TextInputs};
use crate::view::{Status, View};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Reset,
    Quit,
}

pub struct App {
    form: RegistrationForm,
    inputs: TextInputs,
    focus: FocusState,
    status: Status,
    config: Config,
    service: Arc<dyn RegistrationService>,
}

impl App {
    pub fn new(config: Config, service: Arc<dyn RegistrationService>) -> Self {
        Self {
            form: RegistrationForm::new(),
            inputs: TextInputs::new(),
            focus: FocusState::new(),
            status: Status::Ready,
            config,
            service,
        }
    }

    pub fn view(&self) -> View<'_> {
        View {
            form: &self.form,
            inputs: &self.inputs,
            focus: &self.focus,
            status: &self.status,
            error_display: self.config.error_display,
        }
    }

    /// Route a key press to the focused element or a global binding.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Action {
        match key {
            Key::Char('c') if modifiers.ctrl => return Action::Quit,
            Key::Escape => return Action::Quit,
            Key::Char('s') if modifiers.ctrl => return Action::Submit,
            Key::Char('r') if modifiers.ctrl => return Action::Reset,
            Key::Tab | Key::Down => {
                self.focus.focus_next();
                return Action::None;
            }
            Key::BackTab | Key::Up => {
                self.focus.focus_prev();
                return Action::None;
            }
            _ => {}
        }

        match self.focus.focused() {
            FocusTarget::Input(field) => match self.inputs.handle_key(field, key, modifiers) {
                TextEditResult::Changed => {
                    self.form.on_change(field, self.inputs.text(field));
                    Action::None
                }
                TextEditResult::Submitted => Action::Submit,
                TextEditResult::Handled | TextEditResult::Ignored => Action::None,
            },
            FocusTarget::Submit => match key {
                Key::Enter | Key::Char(' ') => Action::Submit,
                _ => Action::None,
            },
        }
    }

    /// Validate the form. On rejection, focus moves to the first invalid field.
    pub fn submit(&mut self) -> Option<Registration> {
        match self.form.submit() {
            SubmitOutcome::Accepted(registration) => Some(registration),
            SubmitOutcome::Rejected(errors) => {
                if let Some(field) = errors.first_field() {
                    self.focus.focus(FocusTarget::Input(field));
                }
                self.status = Status::Rejected(errors.len());
                None
            }
        }
    }

    /// Hand an accepted registration to the service and report the outcome.
    pub async fn register(&mut self, registration: Registration) {
        match self.service.register(&registration).await {
            Ok(()) => self.status = Status::Registered(registration.username),
            Err(e) => {
                log::warn!("registration failed: {}", e);
                self.status = Status::ServiceFailed(e.to_string());
            }
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.inputs.clear();
        self.focus = FocusState::new();
        self.status = Status::Ready;
        log::debug!("form reset");
    }

    /// Run until the user quits.
    pub async fn run(mut self, terminal: &mut Terminal) -> Result<(), AppError> {
        let mut events = EventStream::new();
        terminal.draw(&self.view().render())?;

        while let Some(event) = events.next().await {
            match event? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.handle_key(key.code.into(), key.modifiers.into()) {
                        Action::Quit => break,
                        Action::Submit => {
                            if let Some(registration) = self.submit() {
                                self.register(registration).await;
                            }
                        }
                        Action::Reset => self.reset(),
                        Action::None => {}
                    }
                }
                CrosstermEvent::Resize(..) => {}
                _ => continue,
            }
            terminal.draw(&self.view().render())?;
        }

        log::info!("exiting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use regform_lib::{Field, LoggingRegistrationService, RegistrationError, SubmissionPhase};

    struct RejectingService;

    #[async_trait]
    impl RegistrationService for RejectingService {
        async fn register(&self, _: &Registration) -> Result<(), RegistrationError> {
            Err(RegistrationError::Rejected("username taken".to_string()))
        }
    }

    fn app() -> App {
        App::new(Config::default(), Arc::new(LoggingRegistrationService))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(Key::Char(c), Modifiers::new()), Action::None);
        }
    }

    fn fill(app: &mut App, values: [&str; 4]) {
        for value in values {
            type_text(app, value);
            app.handle_key(Key::Tab, Modifiers::new());
        }
    }

    #[test]
    fn test_typing_updates_focused_field() {
        let mut app = app();
        type_text(&mut app, "alice");
        assert_eq!(app.form.state().get(Field::Username), Some("alice"));
        assert_eq!(app.form.state().get(Field::Email), None);
    }

    #[test]
    fn test_global_bindings() {
        let mut app = app();
        assert_eq!(app.handle_key(Key::Char('s'), Modifiers::ctrl()), Action::Submit);
        assert_eq!(app.handle_key(Key::Char('r'), Modifiers::ctrl()), Action::Reset);
        assert_eq!(app.handle_key(Key::Char('c'), Modifiers::ctrl()), Action::Quit);
        assert_eq!(app.handle_key(Key::Escape, Modifiers::new()), Action::Quit);
    }

    #[test]
    fn test_enter_submits_from_input_and_button() {
        let mut app = app();
        assert_eq!(app.handle_key(Key::Enter, Modifiers::new()), Action::Submit);

        app.focus.focus(FocusTarget::Submit);
        assert_eq!(app.handle_key(Key::Char(' '), Modifiers::new()), Action::Submit);
        assert_eq!(app.handle_key(Key::Char('x'), Modifiers::new()), Action::None);
    }

    #[test]
    fn test_rejected_submit_focuses_first_invalid_field() {
        let mut app = app();
        fill(&mut app, ["alice", "not-an-email", "secret1", "secret1"]);
        assert_eq!(app.focus.focused(), FocusTarget::Submit);

        assert!(app.submit().is_none());
        assert_eq!(app.focus.focused_field(), Some(Field::Email));
        assert_eq!(app.status, Status::Rejected(1));
    }

    #[tokio::test]
    async fn test_accepted_submit_registers() {
        let mut app = app();
        fill(&mut app, ["alice", "alice@x.com", "secret1", "secret1"]);

        let registration = app.submit().unwrap();
        assert_eq!(app.form.phase(), SubmissionPhase::Accepted);
        app.register(registration).await;
        assert_eq!(app.status, Status::Registered("alice".to_string()));
    }

    #[tokio::test]
    async fn test_service_failure_is_reported_not_fatal() {
        let mut app = App::new(Config::default(), Arc::new(RejectingService));
        fill(&mut app, ["alice", "alice@x.com", "secret1", "secret1"]);

        let registration = app.submit().unwrap();
        app.register(registration).await;
        assert_eq!(
            app.status,
            Status::ServiceFailed("Registration rejected: username taken".to_string())
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut app = app();
        fill(&mut app, ["al", "", "", ""]);
        app.submit();
        app.reset();

        assert!(app.form.state().is_pristine());
        assert!(app.form.errors().is_empty());
        assert_eq!(app.inputs.text(Field::Username), "");
        assert_eq!(app.focus.focused_field(), Some(Field::Username));
        assert_eq!(app.status, Status::Ready);
    }
}
