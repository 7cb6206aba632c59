//! Keyboard input handling for the TUI.
//!
//! This module translates key events into calls on `App`. Which handler
//! runs depends on the screen the last session event put us on.

use crossterm::event::{KeyCode, KeyEvent};

use narad_core::{ControlAction, SessionState};

use crate::app::{can_add_field_char, can_add_name_char, App, AppState, LoginFocus, SignUpFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    match app.view {
        SessionState::SignedOut => handle_login_input(app, key),
        SessionState::Registering => {
            handle_signup_input(app, key);
            false
        }
        // The sign-in delay always runs to completion
        SessionState::Authenticating { .. } => false,
        SessionState::SignedIn { .. } => {
            handle_dashboard_input(app, key);
            false
        }
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = app.login_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = app.login_focus.prev();
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::StaffId | LoginFocus::Contact => {
                app.login_focus = app.login_focus.next();
            }
            LoginFocus::LoginButton => app.attempt_login(),
            LoginFocus::SignUpButton => app.open_signup(),
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::StaffId => {
                app.login_staff_id.pop();
            }
            LoginFocus::Contact => {
                app.login_contact.pop();
            }
            LoginFocus::LoginButton | LoginFocus::SignUpButton => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::StaffId => {
                if can_add_field_char(app.login_staff_id.chars().count(), c) {
                    app.login_staff_id.push(c);
                }
            }
            LoginFocus::Contact => {
                if can_add_field_char(app.login_contact.chars().count(), c) {
                    app.login_contact.push(c);
                }
            }
            // Ignore character input on buttons
            LoginFocus::LoginButton | LoginFocus::SignUpButton => {}
        },
        _ => {}
    }
    false
}

fn handle_signup_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_signup(),
        KeyCode::Down | KeyCode::Tab => {
            app.signup_focus = app.signup_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.signup_focus = app.signup_focus.prev();
        }
        KeyCode::Enter => match app.signup_focus {
            SignUpFocus::Button => app.attempt_register(),
            _ => app.signup_focus = app.signup_focus.next(),
        },
        KeyCode::Backspace => {
            if let Some(field) = signup_field(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            let is_name = app.signup_focus == SignUpFocus::Name;
            if let Some(field) = signup_field(app) {
                let len = field.chars().count();
                let accepted = if is_name {
                    can_add_name_char(len, c)
                } else {
                    can_add_field_char(len, c)
                };
                if accepted {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
}

fn signup_field(app: &mut App) -> Option<&mut String> {
    match app.signup_focus {
        SignUpFocus::Name => Some(&mut app.signup_name),
        SignUpFocus::StaffId => Some(&mut app.signup_staff_id),
        SignUpFocus::Contact => Some(&mut app.signup_contact),
        SignUpFocus::Button => None,
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('l') | KeyCode::Char('L') => app.logout(),
        KeyCode::Char(c) => {
            if let Some(action) = control_for_key(c) {
                app.perform(action);
            }
        }
        _ => {}
    }
}

/// Map the number keys 1-7 to the dashboard controls.
fn control_for_key(c: char) -> Option<ControlAction> {
    let index = c.to_digit(10)?.checked_sub(1)? as usize;
    ControlAction::ALL.get(index).copied()
}
