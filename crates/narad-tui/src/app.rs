//! Application state management for the Narad console.
//!
//! `App` owns the session flow and the form state for the login and sign-up
//! screens. It never inspects the session flow directly when rendering:
//! the screen shown is whatever the last session event said.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use narad_core::{
    AlertLog, Config, ControlAction, CredentialStore, Notice, SessionEvents, SessionFlow,
    SessionState,
};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for staff name input.
const MAX_NAME_LENGTH: usize = 60;

/// Maximum length for Staff ID and contact number input.
const MAX_FIELD_LENGTH: usize = 32;

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    StaffId,
    Contact,
    LoginButton,
    SignUpButton,
}

impl LoginFocus {
    pub fn next(&self) -> Self {
        match self {
            LoginFocus::StaffId => LoginFocus::Contact,
            LoginFocus::Contact => LoginFocus::LoginButton,
            LoginFocus::LoginButton => LoginFocus::SignUpButton,
            LoginFocus::SignUpButton => LoginFocus::StaffId,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            LoginFocus::StaffId => LoginFocus::SignUpButton,
            LoginFocus::Contact => LoginFocus::StaffId,
            LoginFocus::LoginButton => LoginFocus::Contact,
            LoginFocus::SignUpButton => LoginFocus::LoginButton,
        }
    }
}

/// Sign-up form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    Name,
    StaffId,
    Contact,
    Button,
}

impl SignUpFocus {
    pub fn next(&self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::StaffId,
            SignUpFocus::StaffId => SignUpFocus::Contact,
            SignUpFocus::Contact => SignUpFocus::Button,
            SignUpFocus::Button => SignUpFocus::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::Button,
            SignUpFocus::StaffId => SignUpFocus::Name,
            SignUpFocus::Contact => SignUpFocus::StaffId,
            SignUpFocus::Button => SignUpFocus::Contact,
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    /// Where `config` is written back; `None` keeps it in memory only.
    config_file: Option<PathBuf>,
    session: SessionFlow,
    session_events: SessionEvents,

    // Mirrors the last session event
    pub view: SessionState,
    pub state: AppState,
    pub notice: Option<Notice>,

    // Login form state
    pub login_staff_id: String,
    pub login_contact: String,
    pub login_focus: LoginFocus,

    // Sign-up form state
    pub signup_name: String,
    pub signup_staff_id: String,
    pub signup_contact: String,
    pub signup_focus: SignUpFocus,

    // Dashboard
    pub alerts: AlertLog,
    pub signed_in_at: Option<Instant>,
}

impl App {
    pub fn new(config: Config, config_file: Option<PathBuf>) -> Result<Self> {
        let staff_file = config.staff_file_path()?;
        debug!(?staff_file, "Staff file configured");

        let mut session = SessionFlow::new(CredentialStore::new(staff_file))
            .with_sign_in_delay(config.sign_in_delay());
        let session_events = session.subscribe();

        let login_staff_id = config.last_staff_id.clone().unwrap_or_default();
        let login_focus = if login_staff_id.is_empty() {
            LoginFocus::StaffId
        } else {
            LoginFocus::Contact
        };
        let alerts = AlertLog::new(config.alert_capacity);

        Ok(Self {
            config,
            config_file,
            session,
            session_events,

            view: SessionState::SignedOut,
            state: AppState::Normal,
            notice: None,

            login_staff_id,
            login_contact: String::new(),
            login_focus,

            signup_name: String::new(),
            signup_staff_id: String::new(),
            signup_contact: String::new(),
            signup_focus: SignUpFocus::Name,

            alerts,
            signed_in_at: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempt login with the credentials from the login form
    pub fn attempt_login(&mut self) {
        let staff_id = self.login_staff_id.trim().to_string();
        let contact = self.login_contact.trim().to_string();

        if staff_id.is_empty() || contact.is_empty() {
            self.notice = Some(Notice::Error(
                "Staff ID and contact number required".to_string(),
            ));
            return;
        }

        match self.session.login(&staff_id, &contact) {
            Ok(()) => {
                self.login_contact.clear();
                self.remember_staff_id(staff_id);
            }
            Err(e) => debug!(error = %e, "Login attempt failed"),
        }
        self.process_session_events();
    }

    fn remember_staff_id(&mut self, staff_id: String) {
        self.config.last_staff_id = Some(staff_id);
        if let Some(ref path) = self.config_file {
            if let Err(e) = self.config.save_to(path) {
                warn!(error = %e, "Failed to save config");
            }
        }
    }

    /// Show the sign-up form
    pub fn open_signup(&mut self) {
        if let Err(e) = self.session.begin_registration() {
            warn!(error = %e, "Cannot open sign-up form");
        }
        self.signup_focus = SignUpFocus::Name;
        self.process_session_events();
    }

    /// Return to the login form without registering
    pub fn close_signup(&mut self) {
        if let Err(e) = self.session.cancel_registration() {
            warn!(error = %e, "Cannot close sign-up form");
        }
        self.clear_signup_form();
        self.process_session_events();
    }

    /// Register the staff member described by the sign-up form
    pub fn attempt_register(&mut self) {
        let name = self.signup_name.trim().to_string();
        let staff_id = self.signup_staff_id.trim().to_string();
        let contact = self.signup_contact.trim().to_string();

        match self.session.register(&name, &staff_id, &contact) {
            Ok(record) => {
                info!(staff_id = %record.staff_id, "Sign-up complete");
                self.clear_signup_form();
                self.login_staff_id = record.staff_id;
                self.login_contact.clear();
                self.login_focus = LoginFocus::Contact;
            }
            Err(e) => debug!(error = %e, "Sign-up rejected"),
        }
        self.process_session_events();
    }

    fn clear_signup_form(&mut self) {
        self.signup_name.clear();
        self.signup_staff_id.clear();
        self.signup_contact.clear();
        self.signup_focus = SignUpFocus::Name;
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "Logout ignored");
        }
        self.process_session_events();
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    pub fn perform(&mut self, action: ControlAction) {
        if self.view.is_signed_in() {
            self.alerts.record(action);
        }
    }

    pub fn staff_file(&self) -> &Path {
        self.session.store().path()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.view.display_name()
    }

    // =========================================================================
    // Event loop hooks
    // =========================================================================

    /// Advance timers and apply pending session events. Called once per
    /// event loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
        self.process_session_events();
    }

    fn process_session_events(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            let entering_dashboard = event.state.is_signed_in() && !self.view.is_signed_in();
            let leaving_dashboard = !event.state.is_signed_in() && self.view.is_signed_in();

            if entering_dashboard {
                self.alerts = AlertLog::with_startup_alerts(self.config.alert_capacity);
                self.signed_in_at = Some(Instant::now());
            }
            if leaving_dashboard {
                self.signed_in_at = None;
                self.login_focus = LoginFocus::Contact;
            }

            self.view = event.state;
            self.notice = event.notice;
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a Staff ID or contact number character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

/// Check if a name character should be accepted
pub fn can_add_name_char(current_len: usize, c: char) -> bool {
    current_len < MAX_NAME_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use narad_core::StaffRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TestApp {
        app: App,
        staff_file: PathBuf,
    }

    impl Drop for TestApp {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.staff_file);
        }
    }

    fn test_app(records: &[StaffRecord]) -> TestApp {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let staff_file = std::env::temp_dir().join(format!(
            "narad_app_test_{}_{}.json",
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_file(&staff_file);
        if !records.is_empty() {
            CredentialStore::new(&staff_file).save(records);
        }

        let config = Config {
            staff_file: Some(staff_file.clone()),
            sign_in_delay_ms: 0,
            ..Config::default()
        };
        let app = App::new(config, None).unwrap();
        TestApp { app, staff_file }
    }

    // -------------------------------------------------------------------------
    // Login Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_reaches_dashboard() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.login_staff_id = "S1".into();
        t.app.login_contact = "111".into();

        t.app.attempt_login();
        assert!(matches!(t.app.view, SessionState::Authenticating { .. }));
        assert!(t.app.login_contact.is_empty());
        assert_eq!(t.app.config.last_staff_id.as_deref(), Some("S1"));

        t.app.tick(Instant::now());
        assert_eq!(t.app.display_name(), Some("Asha"));
        assert_eq!(t.app.alerts.len(), 2);
        assert!(t.app.signed_in_at.is_some());
    }

    #[test]
    fn test_login_trims_form_input() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.login_staff_id = " S1 ".into();
        t.app.login_contact = "111 ".into();

        t.app.attempt_login();
        assert!(matches!(t.app.view, SessionState::Authenticating { .. }));
    }

    #[test]
    fn test_login_invalid_credentials_shows_notice() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.login_staff_id = "S1".into();
        t.app.login_contact = "000".into();

        t.app.attempt_login();
        assert_eq!(t.app.view, SessionState::SignedOut);
        assert_eq!(
            t.app.notice,
            Some(Notice::Error("Invalid Staff ID or contact number".into()))
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut t = test_app(&[]);
        t.app.login_staff_id = "S1".into();

        t.app.attempt_login();
        assert!(t.app.notice.as_ref().is_some_and(Notice::is_error));
        assert_eq!(t.app.view, SessionState::SignedOut);
    }

    #[test]
    fn test_logout_returns_to_login() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.login_staff_id = "S1".into();
        t.app.login_contact = "111".into();
        t.app.attempt_login();
        t.app.tick(Instant::now());

        t.app.logout();
        assert_eq!(t.app.view, SessionState::SignedOut);
        assert_eq!(t.app.display_name(), None);
        assert!(t.app.signed_in_at.is_none());
    }

    // -------------------------------------------------------------------------
    // Sign-up Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_signup_then_login() {
        let mut t = test_app(&[]);
        t.app.open_signup();
        assert_eq!(t.app.view, SessionState::Registering);

        t.app.signup_name = "Bilal".into();
        t.app.signup_staff_id = "S2".into();
        t.app.signup_contact = "222".into();
        t.app.attempt_register();

        assert_eq!(t.app.view, SessionState::SignedOut);
        assert!(t.app.notice.as_ref().is_some_and(|n| !n.is_error()));
        assert_eq!(t.app.login_staff_id, "S2");
        assert!(t.app.signup_name.is_empty());

        t.app.login_contact = "222".into();
        t.app.attempt_login();
        t.app.tick(Instant::now());
        assert_eq!(t.app.display_name(), Some("Bilal"));
    }

    #[test]
    fn test_signup_duplicate_stays_on_form() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.open_signup();
        t.app.signup_name = "Bilal".into();
        t.app.signup_staff_id = "S1".into();
        t.app.signup_contact = "222".into();

        t.app.attempt_register();
        assert_eq!(t.app.view, SessionState::Registering);
        assert_eq!(
            t.app.notice,
            Some(Notice::Error("Staff ID 'S1' already exists".into()))
        );
        assert_eq!(t.app.signup_name, "Bilal");
    }

    #[test]
    fn test_close_signup() {
        let mut t = test_app(&[]);
        t.app.open_signup();
        t.app.signup_name = "Bilal".into();
        t.app.close_signup();
        assert_eq!(t.app.view, SessionState::SignedOut);
        assert!(t.app.signup_name.is_empty());
    }

    // -------------------------------------------------------------------------
    // Dashboard Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_control_actions_only_when_signed_in() {
        let mut t = test_app(&[StaffRecord::new("Asha", "S1", "111")]);
        t.app.perform(ControlAction::ReturnToBase);
        assert!(t.app.alerts.is_empty());

        t.app.login_staff_id = "S1".into();
        t.app.login_contact = "111".into();
        t.app.attempt_login();
        t.app.tick(Instant::now());

        t.app.perform(ControlAction::ReturnToBase);
        assert_eq!(
            t.app.alerts.latest().map(|a| a.message.as_str()),
            Some("Drone returning to base.")
        );
    }

    // -------------------------------------------------------------------------
    // Focus and Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_focus_cycle() {
        let mut focus = LoginFocus::StaffId;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, LoginFocus::StaffId);
        assert_eq!(LoginFocus::StaffId.prev(), LoginFocus::SignUpButton);
    }

    #[test]
    fn test_signup_focus_cycle() {
        assert_eq!(SignUpFocus::Button.next(), SignUpFocus::Name);
        assert_eq!(SignUpFocus::Name.prev(), SignUpFocus::Button);
    }

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(0, 'S'));
        assert!(can_add_field_char(31, '9'));
        assert!(!can_add_field_char(32, 'a'));
        assert!(!can_add_field_char(0, '\x00'));
        assert!(!can_add_field_char(0, '\n'));
    }

    #[test]
    fn test_can_add_name_char() {
        assert!(can_add_name_char(0, 'é'));
        assert!(can_add_name_char(59, ' '));
        assert!(!can_add_name_char(60, 'a'));
        assert!(!can_add_name_char(0, '\t'));
    }
}
