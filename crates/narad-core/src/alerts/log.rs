use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::actions::ControlAction;

/// Alerts kept before the oldest are dropped.
pub const DEFAULT_ALERT_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub timestamp: DateTime<Local>,
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Bounded alert history, newest first.
#[derive(Debug, Clone)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
    capacity: usize,
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            alerts: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// A log seeded with the alerts shown when the dashboard opens.
    pub fn with_startup_alerts(capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        log.push(AlertLevel::Info, "System initialized. Awaiting commands.");
        log.push(AlertLevel::Warning, "Check drone pre-flight diagnostics.");
        log
    }

    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>) {
        self.push_alert(Alert::new(level, message));
    }

    pub fn push_alert(&mut self, alert: Alert) {
        debug!(level = alert.level.as_str(), message = %alert.message, "Alert raised");
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    /// Raise the alerts for a dashboard control.
    pub fn record(&mut self, action: ControlAction) {
        info!(action = action.label(), "Control action");
        for (level, message) in action.alerts() {
            self.push(*level, *message);
        }
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
