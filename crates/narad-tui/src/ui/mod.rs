//! Terminal UI module using ratatui.
//!
//! - `render`: screen rendering for login, sign-up, loading and dashboard
//! - `input`: keyboard event handling
//! - `styles`: color palette and text styling

pub mod input;
pub mod render;
pub mod styles;
