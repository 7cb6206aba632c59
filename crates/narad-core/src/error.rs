use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or decoding the staff file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read staff file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed staff file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a registration is refused. The display strings are shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("{0} is required")]
    Validation(&'static str),

    #[error("Staff ID '{0}' already exists")]
    AlreadyExists(String),
}

/// Errors from driving the session state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid Staff ID or contact number")]
    InvalidCredentials,

    #[error("Cannot {operation} while {from}")]
    InvalidTransition {
        from: &'static str,
        operation: &'static str,
    },

    #[error(transparent)]
    Register(#[from] RegisterError),
}
