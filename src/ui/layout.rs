//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::PROCEED_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.state.current_view.path()),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(get_view_hints(app), Style::default().fg(Color::Gray)),
    ];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match &app.state.current_view {
        View::Home(_) => "q:quit".to_string(),
        View::Wizard if app.state.is_loading => "^C:quit".to_string(),
        View::Wizard if app.state.load_error.is_some() => "r:retry  q:quit".to_string(),
        View::Wizard => format!(
            "Tab:next field  Space/y/n:toggle  {PROCEED_SHORTCUT}:next/finish  Esc:back  ^C:quit"
        ),
    }
}
