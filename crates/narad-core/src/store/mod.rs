//! Staff credential storage.
//!
//! Staff records live in a single JSON array on disk. The whole file is
//! read on every lookup and rewritten on every save; there is no locking,
//! so only one console process should use a given file.

pub mod credentials;

pub use credentials::CredentialStore;
