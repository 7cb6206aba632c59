/// Where the console is in the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    Registering,
    /// Credentials matched; waiting for the sign-in delay to elapse.
    Authenticating { name: String },
    SignedIn { name: String },
}

impl SessionState {
    /// Short description used in transition errors and logs.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::SignedOut => "signed out",
            SessionState::Registering => "registering",
            SessionState::Authenticating { .. } => "authenticating",
            SessionState::SignedIn { .. } => "signed in",
        }
    }

    /// Staff display name carried by the session, if any.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            SessionState::Authenticating { name } | SessionState::SignedIn { name } => {
                Some(name.as_str())
            }
            SessionState::SignedOut | SessionState::Registering => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }
}

/// User-facing message attached to a session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Broadcast to subscribers after every session action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub state: SessionState,
    pub notice: Option<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(SessionState::SignedOut.display_name(), None);
        assert_eq!(SessionState::Registering.display_name(), None);
        assert_eq!(
            SessionState::Authenticating { name: "A".into() }.display_name(),
            Some("A")
        );
        assert_eq!(
            SessionState::SignedIn { name: "A".into() }.display_name(),
            Some("A")
        );
    }

    #[test]
    fn test_is_signed_in() {
        assert!(SessionState::SignedIn { name: "A".into() }.is_signed_in());
        assert!(!SessionState::Authenticating { name: "A".into() }.is_signed_in());
        assert!(!SessionState::SignedOut.is_signed_in());
    }

    #[test]
    fn test_notice() {
        let notice = Notice::Error("bad".into());
        assert!(notice.is_error());
        assert_eq!(notice.text(), "bad");
        assert!(!Notice::Success("ok".into()).is_error());
    }
}
