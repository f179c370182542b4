//! Application state and key handling

use crate::config::DemoConfig;
use crate::demo;
use crate::state::{AppState, Console};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::json;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Effective user configuration
    pub config: DemoConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Run the scripted walkthrough and set up the interactive session
    pub fn new(config: DemoConfig) -> Result<Self> {
        let mut console = Console::new(true);
        let login = demo::run_script(&mut console)?;
        tracing::info!("walkthrough finished with {} console entries", console.len());

        // From here on entries log at debug so they stay out of the terminal UI
        console.set_echo(false);

        Ok(Self {
            state: AppState::new(console, login),
            config,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let recorded_before = self.state.console.recorded();
        let state = &mut self.state;

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Right => state.focused_button = state.focused_button.next(),
            KeyCode::BackTab | KeyCode::Left => state.focused_button = state.focused_button.prev(),
            KeyCode::Enter => state.press_focused_button(),
            KeyCode::Up => state.scroll_console_up(),
            KeyCode::Down => state.scroll_console_down(),
            KeyCode::Char('a') => demo::add_two_factor(&mut state.login, &mut state.console),
            KeyCode::Char('d') => demo::remove_two_factor(&mut state.login, &mut state.console),
            KeyCode::Char('x') => {
                demo::remove_required(&mut state.login, &mut state.console, "email")
            }
            KeyCode::Char('s') => demo::set_credentials(
                &mut state.login,
                &mut state.console,
                "user@example.com",
                "correct horse",
            ),
            KeyCode::Char('r') => demo::reset_login(&mut state.login, &mut state.console, None),
            KeyCode::Char('R') => demo::reset_login(
                &mut state.login,
                &mut state.console,
                Some(&json!({"email": "reset@example.com", "password": ""})),
            ),
            _ => {}
        }

        if self.state.console.recorded() > recorded_before {
            self.state.follow_console();
            self.state.status_message = self
                .state
                .console
                .entries()
                .iter()
                .rev()
                .find(|e| e.outcome != crate::state::Outcome::Info)
                .map(|e| e.message.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CardButton, Outcome, MAX_CONSOLE_ENTRIES};
    use crossterm::event::KeyEventState;

    fn app() -> App {
        App::new(DemoConfig::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_new_runs_walkthrough() {
        let app = app();
        assert!(!app.state.console.is_empty());
        assert_eq!(app.state.console_selected, app.state.console.len() - 1);
        assert!(!app.should_quit());
    }

    mod quitting {
        use super::*;

        #[test]
        fn test_q_quits() {
            let mut app = app();
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = app();
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit());
        }

        #[test]
        fn test_release_events_are_ignored() {
            let mut app = app();
            app.handle_key(KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            });
            assert!(!app.should_quit());
        }
    }

    mod card {
        use super::*;

        #[test]
        fn test_focus_and_press() {
            let mut app = app();
            press(&mut app, KeyCode::Right);
            assert_eq!(app.state.focused_button, CardButton::Share);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.state.share_count, 1);
            press(&mut app, KeyCode::Left);
            assert_eq!(app.state.focused_button, CardButton::Like);
        }
    }

    mod form_keys {
        use super::*;

        #[test]
        fn test_add_and_remove_two_factor() {
            let mut app = app();
            press(&mut app, KeyCode::Char('a'));
            assert!(app.state.login.contains(demo::TWO_FACTOR));
            press(&mut app, KeyCode::Char('d'));
            assert!(!app.state.login.contains(demo::TWO_FACTOR));
        }

        #[test]
        fn test_remove_email_is_rejected_and_reported() {
            let mut app = app();
            press(&mut app, KeyCode::Char('x'));
            assert!(app.state.login.contains("email"));
            let status = app.state.status_message.clone().unwrap();
            assert!(status.contains("IllegalRemoval"));
            let last_op = app
                .state
                .console
                .entries()
                .iter()
                .rev()
                .find(|e| e.outcome != Outcome::Info)
                .unwrap();
            assert_eq!(last_op.outcome, Outcome::Rejected);
        }

        #[test]
        fn test_set_value_rejected_once_two_factor_present() {
            let mut app = app();
            press(&mut app, KeyCode::Char('s'));
            assert_eq!(app.state.login.value()["email"], "user@example.com");

            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Char('r'));
            press(&mut app, KeyCode::Char('s'));
            assert!(app
                .state
                .status_message
                .as_deref()
                .unwrap()
                .contains("ShapeMismatch"));
        }

        #[test]
        fn test_reset_keys() {
            let mut app = app();
            press(&mut app, KeyCode::Char('s'));
            press(&mut app, KeyCode::Char('r'));
            assert_eq!(app.state.login.value()["email"], "");
            press(&mut app, KeyCode::Char('R'));
            assert_eq!(app.state.login.value()["email"], "reset@example.com");
        }

        #[test]
        fn test_console_follows_new_entries() {
            let mut app = app();
            press(&mut app, KeyCode::Up);
            press(&mut app, KeyCode::Up);
            press(&mut app, KeyCode::Char('a'));
            assert_eq!(app.state.console_selected, app.state.console.len() - 1);
        }

        #[test]
        fn test_console_follows_once_log_is_full() {
            let mut app = app();
            for _ in 0..MAX_CONSOLE_ENTRIES {
                press(&mut app, KeyCode::Char('x'));
            }
            assert_eq!(app.state.console.len(), MAX_CONSOLE_ENTRIES);

            press(&mut app, KeyCode::Up);
            press(&mut app, KeyCode::Char('a'));
            assert_eq!(app.state.console_selected, MAX_CONSOLE_ENTRIES - 1);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("login.add_control('twoFactor')")
            );
        }
    }
}
