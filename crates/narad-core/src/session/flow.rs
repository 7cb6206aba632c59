use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::models::StaffRecord;
use crate::store::CredentialStore;

use super::state::{Notice, SessionEvent, SessionState};

/// Time spent on the loading screen between a credential match and sign-in.
pub const DEFAULT_SIGN_IN_DELAY: Duration = Duration::from_millis(1500);

/// Receiving end of a `SessionFlow::subscribe` channel.
pub type SessionEvents = mpsc::UnboundedReceiver<SessionEvent>;

const REGISTRATION_SUCCESS: &str = "Registration successful. Please log in.";

/// Session state machine over a `CredentialStore`.
#[derive(Debug)]
pub struct SessionFlow {
    store: CredentialStore,
    state: SessionState,
    sign_in_delay: Duration,
    /// Deadline of the armed sign-in timer. Once set it is only cleared by
    /// firing.
    sign_in_at: Option<Instant>,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl SessionFlow {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            state: SessionState::SignedOut,
            sign_in_delay: DEFAULT_SIGN_IN_DELAY,
            sign_in_at: None,
            subscribers: Vec::new(),
        }
    }

    pub fn with_sign_in_delay(mut self, delay: Duration) -> Self {
        self.sign_in_delay = delay;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Receive every subsequent session event.
    pub fn subscribe(&mut self) -> SessionEvents {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Check the credentials and, on a match, start the sign-in timer.
    pub fn login(&mut self, staff_id: &str, contact_number: &str) -> Result<(), SessionError> {
        self.expect_state(matches!(self.state, SessionState::SignedOut), "log in")?;

        let found = if staff_id.trim().is_empty() || contact_number.trim().is_empty() {
            None
        } else {
            self.store.find_by_credentials(staff_id, contact_number)
        };

        match found {
            Some(StaffRecord { name, .. }) => {
                info!(staff_id, "Credentials accepted, signing in");
                self.sign_in_at = Some(Instant::now() + self.sign_in_delay);
                self.transition(SessionState::Authenticating { name }, None);
                Ok(())
            }
            None => {
                warn!(staff_id, "Login rejected");
                let err = SessionError::InvalidCredentials;
                self.emit(Some(Notice::Error(err.to_string())));
                Err(err)
            }
        }
    }

    /// Fire the sign-in timer if it is due. Returns true when it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.sign_in_at {
            Some(due) if now >= due => {
                self.sign_in_at = None;
                let name = self.state.display_name().unwrap_or_default().to_string();
                info!(name = %name, "Signed in");
                self.transition(SessionState::SignedIn { name }, None);
                true
            }
            _ => false,
        }
    }

    /// Open the sign-up form.
    pub fn begin_registration(&mut self) -> Result<(), SessionError> {
        self.expect_state(
            matches!(self.state, SessionState::SignedOut),
            "start registration",
        )?;
        self.transition(SessionState::Registering, None);
        Ok(())
    }

    /// Leave the sign-up form without registering.
    pub fn cancel_registration(&mut self) -> Result<(), SessionError> {
        self.expect_state(
            matches!(self.state, SessionState::Registering),
            "cancel registration",
        )?;
        self.transition(SessionState::SignedOut, None);
        Ok(())
    }

    /// Register a new staff member. On success the flow returns to
    /// `SignedOut` so the new account can log in.
    pub fn register(
        &mut self,
        name: &str,
        staff_id: &str,
        contact_number: &str,
    ) -> Result<StaffRecord, SessionError> {
        self.expect_state(
            matches!(
                self.state,
                SessionState::SignedOut | SessionState::Registering
            ),
            "register",
        )?;

        match self.store.register(name, staff_id, contact_number) {
            Ok(record) => {
                self.transition(
                    SessionState::SignedOut,
                    Some(Notice::Success(REGISTRATION_SUCCESS.to_string())),
                );
                Ok(record)
            }
            Err(e) => {
                debug!(error = %e, "Registration rejected");
                self.emit(Some(Notice::Error(e.to_string())));
                Err(e.into())
            }
        }
    }

    /// End the signed-in session.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.expect_state(self.state.is_signed_in(), "log out")?;
        info!(name = ?self.state.display_name(), "Logged out");
        self.transition(SessionState::SignedOut, None);
        Ok(())
    }

    fn expect_state(&self, allowed: bool, operation: &'static str) -> Result<(), SessionError> {
        if allowed {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.state.label(),
                operation,
            })
        }
    }

    fn transition(&mut self, state: SessionState, notice: Option<Notice>) {
        debug!(from = self.state.label(), to = state.label(), "Session transition");
        self.state = state;
        self.emit(notice);
    }

    fn emit(&mut self, notice: Option<Notice>) {
        let event = SessionEvent {
            state: self.state.clone(),
            notice,
        };
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegisterError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TestStore(CredentialStore);

    impl TestStore {
        fn new(records: &[StaffRecord]) -> Self {
            let n = COUNTER.fetch_add(1, Ordering::SeqCst);
            let path = std::env::temp_dir().join(format!(
                "narad_session_test_{}_{}.json",
                std::process::id(),
                n
            ));
            let _ = std::fs::remove_file(&path);
            let store = CredentialStore::new(path);
            if !records.is_empty() {
                store.save(records);
            }
            Self(store)
        }
    }

    impl Drop for TestStore {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(self.0.path());
        }
    }

    fn flow_with(records: &[StaffRecord]) -> (TestStore, SessionFlow) {
        let store = TestStore::new(records);
        let flow = SessionFlow::new(store.0.clone()).with_sign_in_delay(Duration::ZERO);
        (store, flow)
    }

    fn drain(rx: &mut SessionEvents) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_login_success_reaches_signed_in() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        let mut rx = flow.subscribe();

        flow.login("S1", "111").unwrap();
        assert_eq!(
            flow.state(),
            &SessionState::Authenticating { name: "A".into() }
        );

        assert!(flow.tick(Instant::now()));
        assert_eq!(flow.state(), &SessionState::SignedIn { name: "A".into() });

        let states: Vec<_> = drain(&mut rx).into_iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                SessionState::Authenticating { name: "A".into() },
                SessionState::SignedIn { name: "A".into() },
            ]
        );
    }

    #[test]
    fn test_login_wrong_contact_stays_signed_out() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        let mut rx = flow.subscribe();

        assert_eq!(
            flow.login("S1", "000"),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(flow.state(), &SessionState::SignedOut);
        assert!(!flow.tick(Instant::now()));

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].state, SessionState::SignedOut);
        assert_eq!(
            events[0].notice,
            Some(Notice::Error("Invalid Staff ID or contact number".into()))
        );
    }

    #[test]
    fn test_login_on_empty_store() {
        let (_store, mut flow) = flow_with(&[]);
        assert_eq!(
            flow.login("S1", "111"),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(flow.state(), &SessionState::SignedOut);
    }

    #[test]
    fn test_login_blank_input_never_matches() {
        let (store, mut flow) = flow_with(&[]);
        std::fs::write(
            store.0.path(),
            r#"[{"name":"Ghost","staff_id":"","contact_number":""}]"#,
        )
        .unwrap();
        let mut rx = flow.subscribe();

        for (id, contact) in [("", ""), ("  ", " "), ("", "111")] {
            assert_eq!(
                flow.login(id, contact),
                Err(SessionError::InvalidCredentials)
            );
        }
        assert!(!flow.tick(Instant::now()));
        assert_eq!(flow.state(), &SessionState::SignedOut);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.notice.as_ref().is_some_and(Notice::is_error)));
    }

    #[test]
    fn test_sign_in_waits_for_delay() {
        let store = TestStore::new(&[StaffRecord::new("A", "S1", "111")]);
        let delay = Duration::from_secs(60);
        let mut flow = SessionFlow::new(store.0.clone()).with_sign_in_delay(delay);

        flow.login("S1", "111").unwrap();
        assert!(!flow.tick(Instant::now()));
        assert!(matches!(flow.state(), SessionState::Authenticating { .. }));

        assert!(flow.tick(Instant::now() + delay));
        assert!(flow.state().is_signed_in());

        // The timer fires exactly once.
        assert!(!flow.tick(Instant::now() + delay * 2));
    }

    #[test]
    fn test_timer_cannot_be_cancelled() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        flow.login("S1", "111").unwrap();

        assert!(flow.logout().is_err());
        assert!(flow.login("S1", "111").is_err());
        assert!(flow.begin_registration().is_err());

        assert!(flow.tick(Instant::now()));
        assert!(flow.state().is_signed_in());
    }

    #[test]
    fn test_register_duplicate_fails() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        flow.begin_registration().unwrap();
        let mut rx = flow.subscribe();

        let err = flow.register("B", "S1", "222").unwrap_err();
        assert_eq!(
            err,
            SessionError::Register(RegisterError::AlreadyExists("S1".into()))
        );
        assert_eq!(flow.state(), &SessionState::Registering);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(events[0].notice.as_ref().is_some_and(Notice::is_error));
    }

    #[test]
    fn test_register_then_login() {
        let (_store, mut flow) = flow_with(&[]);
        flow.begin_registration().unwrap();

        let record = flow.register("B", "S2", "222").unwrap();
        assert_eq!(record, StaffRecord::new("B", "S2", "222"));
        assert_eq!(flow.state(), &SessionState::SignedOut);

        flow.login("S2", "222").unwrap();
        flow.tick(Instant::now());
        assert_eq!(flow.state().display_name(), Some("B"));
    }

    #[test]
    fn test_register_validation_error_surfaces_message() {
        let (_store, mut flow) = flow_with(&[]);
        flow.begin_registration().unwrap();
        let mut rx = flow.subscribe();

        assert!(flow.register("", "S2", "222").is_err());
        let events = drain(&mut rx);
        assert_eq!(
            events[0].notice,
            Some(Notice::Error("Name is required".into()))
        );
    }

    #[test]
    fn test_cancel_registration() {
        let (_store, mut flow) = flow_with(&[]);
        assert!(flow.cancel_registration().is_err());
        flow.begin_registration().unwrap();
        flow.cancel_registration().unwrap();
        assert_eq!(flow.state(), &SessionState::SignedOut);
    }

    #[test]
    fn test_logout_discards_name() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        flow.login("S1", "111").unwrap();
        flow.tick(Instant::now());

        flow.logout().unwrap();
        assert_eq!(flow.state(), &SessionState::SignedOut);
        assert_eq!(flow.state().display_name(), None);
        assert_eq!(
            flow.logout(),
            Err(SessionError::InvalidTransition {
                from: "signed out",
                operation: "log out",
            })
        );
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let (_store, mut flow) = flow_with(&[]);
        let rx = flow.subscribe();
        let mut kept = flow.subscribe();
        drop(rx);

        flow.begin_registration().unwrap();
        assert_eq!(flow.subscribers.len(), 1);
        assert_eq!(drain(&mut kept).len(), 1);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events_async() {
        let (_store, mut flow) = flow_with(&[StaffRecord::new("A", "S1", "111")]);
        let mut rx = flow.subscribe();

        flow.login("S1", "111").unwrap();
        flow.tick(Instant::now());

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(first.state, SessionState::Authenticating { .. }));
        assert!(second.state.is_signed_in());
    }
}
