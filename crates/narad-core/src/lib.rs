//! Core library for the Narad dispatch console.
//!
//! This crate holds everything that is not presentation:
//! - `store`: the JSON-backed staff credential store
//! - `session`: the sign-in/sign-up state machine and its event channel
//! - `alerts`: the dashboard's system alert log and control actions
//! - `config`: application configuration and path resolution

pub mod alerts;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;

pub use alerts::{Alert, AlertLevel, AlertLog, ControlAction};
pub use config::Config;
pub use error::{RegisterError, SessionError, StoreError};
pub use models::StaffRecord;
pub use session::{Notice, SessionEvent, SessionEvents, SessionFlow, SessionState};
pub use store::CredentialStore;
