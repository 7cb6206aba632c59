//! Dashboard system alerts.
//!
//! The alert log is the dashboard's running record of operator actions and
//! system notices, newest first. `ControlAction` maps each dashboard control
//! to the alerts it raises.

pub mod actions;
pub mod log;

pub use actions::ControlAction;
pub use log::{Alert, AlertLevel, AlertLog, DEFAULT_ALERT_CAPACITY};
