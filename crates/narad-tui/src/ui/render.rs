use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use narad_core::utils::{format_contact_number, truncate_string};
use narad_core::{ControlAction, Notice, SessionState};

use crate::app::{App, AppState, LoginFocus, SignUpFocus};

use super::styles;

const TITLE: &str = "Narad Medical Courier";

/// Width of a text field's visible area
const FIELD_WIDTH: usize = 18;

pub fn render(frame: &mut Frame, app: &App) {
    match app.view {
        SessionState::SignedOut => render_login(frame, app),
        SessionState::Registering => render_signup(frame, app),
        SessionState::Authenticating { ref name } => render_loading(frame, name),
        SessionState::SignedIn { ref name } => render_dashboard(frame, app, name),
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

// ============================================================================
// Login / Sign-up
// ============================================================================

fn text_field<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let shown: String = value
        .chars()
        .skip(value.chars().count().saturating_sub(FIELD_WIDTH))
        .collect();
    let cursor = if focused { "▌" } else { " " };
    Line::from(vec![
        Span::styled(format!("  {:>16}: [", label), styles::muted_style()),
        Span::styled(format!("{:<width$}{}", shown, cursor, width = FIELD_WIDTH), style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn button<'a>(label: &'a str, focused: bool) -> Vec<Span<'a>> {
    if focused {
        vec![
            Span::raw("["),
            Span::styled(format!(" ▶ {} ◀ ", label), styles::selected_style()),
            Span::raw("]"),
        ]
    } else {
        vec![
            Span::raw("["),
            Span::styled(format!("   {}   ", label), styles::list_item_style()),
            Span::raw("]"),
        ]
    }
}

fn notice_line(notice: &Notice) -> Line<'static> {
    let style = if notice.is_error() {
        styles::error_style()
    } else {
        styles::success_style()
    };
    Line::from(Span::styled(format!("  {}", notice.text()), style))
}

fn render_login(frame: &mut Frame, app: &App) {
    let height = if app.notice.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(50, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Welcome to Narad!", styles::title_style())),
        Line::from(Span::styled("  Please Sign-in", styles::muted_style())),
        Line::from(""),
        text_field(
            "Staff ID",
            &app.login_staff_id,
            app.login_focus == LoginFocus::StaffId,
        ),
        text_field(
            "Contact Number",
            &app.login_contact,
            app.login_focus == LoginFocus::Contact,
        ),
        Line::from(""),
    ];

    let mut buttons = vec![Span::raw("        ")];
    buttons.extend(button("Login", app.login_focus == LoginFocus::LoginButton));
    buttons.push(Span::raw("  "));
    buttons.extend(button("Sign-Up", app.login_focus == LoginFocus::SignUpButton));
    lines.push(Line::from(buttons));

    if let Some(ref notice) = app.notice {
        lines.push(Line::from(""));
        lines.push(notice_line(notice));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", TITLE), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_signup(frame: &mut Frame, app: &App) {
    let height = if app.notice.is_some() { 14 } else { 12 };
    let area = centered_rect_fixed(50, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Staff Sign-Up", styles::title_style())),
        Line::from(""),
        text_field("Name", &app.signup_name, app.signup_focus == SignUpFocus::Name),
        text_field(
            "Staff ID",
            &app.signup_staff_id,
            app.signup_focus == SignUpFocus::StaffId,
        ),
        text_field(
            "Contact Number",
            &app.signup_contact,
            app.signup_focus == SignUpFocus::Contact,
        ),
        Line::from(""),
    ];

    let mut buttons = vec![Span::raw("             ")];
    buttons.extend(button("Register", app.signup_focus == SignUpFocus::Button));
    lines.push(Line::from(buttons));
    lines.push(Line::from(Span::styled(
        "  [Esc] back to login",
        styles::muted_style(),
    )));

    if let Some(ref notice) = app.notice {
        lines.push(Line::from(""));
        lines.push(notice_line(notice));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", TITLE), styles::title_style()))
        .borders(Borders::ALL)
        .border_style(styles::border_style());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_loading(frame: &mut Frame, name: &str) {
    let area = centered_rect_fixed(50, 6, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            format!("  Signing in {}...", truncate_string(name, 30)),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Loading operations dashboard",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Dashboard
// ============================================================================

fn render_dashboard(frame: &mut Frame, app: &App, name: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, name, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(45),
            Constraint::Percentage(30),
        ])
        .split(chunks[1]);

    render_mission_panel(frame, panels[0]);
    render_delivery_panel(frame, panels[1]);
    render_controls_panel(frame, app, panels[2]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, name: &str, area: Rect) {
    let welcome = format!("Welcome, {}!", truncate_string(name, 24));
    let clock = Local::now().format("%d-%m-%Y | %I:%M:%S %p").to_string();

    let used = TITLE.len() + welcome.chars().count() + clock.len() + 6;
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(format!("  {}", TITLE), styles::title_style()),
        Span::raw("  "),
        Span::styled(welcome, styles::success_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(clock, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_mission_panel(frame: &mut Frame, area: Rect) {
    // Telemetry is not wired to any drone; the panel shows placeholders.
    let lines = vec![
        Line::from(Span::styled("Current Mission Status", styles::label_style())),
        Line::from(Span::styled("IDLE", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled("Drone Telemetry", styles::label_style())),
        Line::from(Span::styled("GPS: --", styles::muted_style())),
        Line::from(Span::styled("Altitude: -- m", styles::muted_style())),
        Line::from(Span::styled("Speed: -- m/s", styles::muted_style())),
        Line::from(Span::styled("Payload: --", styles::muted_style())),
        Line::from(Span::styled("Estimated ETA: --", styles::muted_style())),
    ];

    let block = Block::default()
        .title(" Mission ")
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_delivery_panel(frame: &mut Frame, area: Rect) {
    let recipient = format!("Dr. Priya Sharma - {}", format_contact_number("9876543210"));
    let rows = [
        ("Destination", "Apollo Hospital, Delhi".to_string()),
        ("Address", "Mathura Rd, Sarita Vihar, Delhi 110076".to_string()),
        ("Recipient", recipient),
        ("Payload", "COVID-19 Vaccines (x50 doses)".to_string()),
        ("Temp Log", "4.2°C (Optimal)".to_string()),
    ];

    let mut lines = vec![
        Line::from(Span::styled("Active Delivery Details", styles::label_style())),
        Line::from(""),
    ];
    for (label, value) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", format!("{}:", label)), styles::label_style()),
            Span::styled(value, styles::list_item_style()),
        ]));
    }

    let block = Block::default()
        .title(" Delivery ")
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_controls_panel(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ControlAction::ALL.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let controls: Vec<Line> = ControlAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), styles::help_key_style()),
                Span::styled(action.label(), styles::list_item_style()),
            ])
        })
        .collect();
    let block = Block::default()
        .title(" Drone Controls ")
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(Paragraph::new(controls).block(block), rows[0]);

    let width = rows[1].width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .map(|alert| {
            ListItem::new(Line::from(Span::styled(
                truncate_string(&alert.to_string(), width),
                styles::alert_style(alert.level),
            )))
        })
        .collect();
    let block = Block::default()
        .title(" System Alerts ")
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(List::new(items).block(block), rows[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let on_duty = app
        .signed_in_at
        .map(|t| format!(" | on duty {}m", t.elapsed().as_secs() / 60))
        .unwrap_or_default();
    let left = format!(" Staff file: {}{} ", app.staff_file().display(), on_duty);
    let right = " [1-7] controls | [l]ogout | [q]uit ";
    let padding = (area.width as usize)
        .saturating_sub(left.chars().count())
        .saturating_sub(right.len());

    let line = Line::from(vec![
        Span::styled(left, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, styles::muted_style()),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(styles::status_bar_style()),
        area,
    );
}

// ============================================================================
// Overlays
// ============================================================================

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::label_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style())
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
