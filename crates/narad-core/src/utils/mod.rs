//! Utility functions for string formatting.

pub mod format;

pub use format::{format_contact_number, truncate_string};
