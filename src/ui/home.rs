//! Home destination rendering

use crate::state::HomeState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Headline shown after finishing onboarding
pub const WELCOME_MESSAGE: &str = "Welcome! Your onboarding is complete.";

/// Headline shown when redirected because onboarding was already done
pub const ALREADY_ONBOARDED_MESSAGE: &str = "You have already completed onboarding.";

/// Draw the home view
pub fn draw(frame: &mut Frame, area: Rect, home: HomeState) {
    let (headline, color) = if home.onboarding {
        (WELCOME_MESSAGE, Color::Green)
    } else {
        (ALREADY_ONBOARDED_MESSAGE, Color::Cyan)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press q to quit.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Home ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
