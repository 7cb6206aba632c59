//! Sign-in and sign-up session handling.
//!
//! `SessionFlow` is the single owner of the console's session state. The
//! presentation layer drives it with user actions and calls `tick` from its
//! event loop; it learns about every transition through `subscribe`.
//!
//! ```text
//! SignedOut --login--> Authenticating --(delay)--> SignedIn --logout--> SignedOut
//! SignedOut --begin_registration--> Registering --register--> SignedOut
//! ```

pub mod flow;
pub mod state;

pub use flow::{SessionEvents, SessionFlow, DEFAULT_SIGN_IN_DELAY};
pub use state::{Notice, SessionEvent, SessionState};
