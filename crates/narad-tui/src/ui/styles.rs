use ratatui::style::{Color, Modifier, Style};

use narad_core::AlertLevel;

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SUCCESS: Color = Color::Rgb(96, 160, 96);
pub const WARNING: Color = Color::Rgb(192, 160, 64);
pub const DANGER: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn label_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn success_style() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn error_style() -> Style {
    Style::default().fg(DANGER)
}

pub fn border_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(WARNING)
        .add_modifier(Modifier::BOLD)
}

pub fn alert_style(level: AlertLevel) -> Style {
    match level {
        AlertLevel::Info => Style::default().fg(PRIMARY),
        AlertLevel::Success => Style::default().fg(SUCCESS),
        AlertLevel::Warning => Style::default().fg(WARNING),
        AlertLevel::Danger => Style::default().fg(DANGER).add_modifier(Modifier::BOLD),
    }
}
