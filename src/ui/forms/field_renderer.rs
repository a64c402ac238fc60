//! Field rendering utilities for forms

use crate::state::{FieldDefinition, FieldKind, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a multiline input (borders included)
const MULTILINE_HEIGHT: u16 = 6;

/// Rows a field needs; unknown kinds take none
pub fn field_height(kind: &FieldKind) -> u16 {
    match kind {
        FieldKind::Text | FieldKind::YesNo => 3,
        FieldKind::MultilineText => MULTILINE_HEIGHT,
        FieldKind::Unknown(_) => 0,
    }
}

/// Draw a field with the widget matching its kind.
/// Unknown kinds render nothing; they are reported when the form loads.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    is_active: bool,
) {
    match &field.kind {
        FieldKind::Text => draw_text_input(frame, area, field, value, is_active, false),
        FieldKind::MultilineText => draw_text_input(frame, area, field, value, is_active, true),
        FieldKind::YesNo => draw_toggle(frame, area, field, value, is_active),
        FieldKind::Unknown(_) => {}
    }
}

fn field_title(field: &FieldDefinition) -> String {
    if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    }
}

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    is_active: bool,
    is_multiline: bool,
) {
    let value = value.map(FieldValue::as_text).unwrap_or("");
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let text_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, text_style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn draw_toggle(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDefinition,
    value: Option<&FieldValue>,
    is_active: bool,
) {
    let (mark, mark_style) = match value {
        Some(FieldValue::Flag(true)) => ("[x]", Style::default().fg(Color::Green)),
        Some(FieldValue::Flag(false)) => ("[ ]", Style::default().fg(Color::Gray)),
        // untouched: nothing recorded yet
        _ => ("[ ]", Style::default().fg(Color::DarkGray)),
    };
    let answer = match value {
        Some(FieldValue::Flag(true)) => "Yes",
        Some(FieldValue::Flag(false)) => "No",
        _ => "",
    };

    let mut label_style = Style::default();
    if is_active {
        label_style = label_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
    }

    let line = Line::from(vec![
        Span::styled(mark, mark_style),
        Span::raw(" "),
        Span::styled(answer, mark_style),
    ]);

    let block = Block::default()
        .title(Span::styled(field_title(field), label_style))
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(
        Paragraph::new(line).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(field: &FieldDefinition, value: Option<&FieldValue>, is_active: bool) -> String {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_field(frame, frame.area(), field, value, is_active))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_heights() {
        assert_eq!(field_height(&FieldKind::Text), 3);
        assert_eq!(field_height(&FieldKind::YesNo), 3);
        assert_eq!(field_height(&FieldKind::MultilineText), MULTILINE_HEIGHT);
        assert_eq!(field_height(&FieldKind::Unknown("date".into())), 0);
    }

    #[test]
    fn test_text_input_shows_label_and_value() {
        let field = FieldDefinition::new("firstName", "First Name", FieldKind::Text, true);
        let out = render(&field, Some(&FieldValue::Text("Ann".into())), true);
        assert!(out.contains("First Name *"));
        assert!(out.contains("Ann"));
    }

    #[test]
    fn test_inactive_empty_text_shows_placeholder() {
        let field = FieldDefinition::new("lastName", "Last Name", FieldKind::Text, false);
        let out = render(&field, None, false);
        assert!(out.contains("(empty)"));
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_toggle_shows_checked_state() {
        let field = FieldDefinition::new("updates", "Updates", FieldKind::YesNo, true);
        assert!(render(&field, Some(&FieldValue::Flag(true)), false).contains("[x] Yes"));
        assert!(render(&field, Some(&FieldValue::Flag(false)), false).contains("[ ] No"));
    }

    #[test]
    fn test_unknown_kind_renders_nothing() {
        let field = FieldDefinition::new("dob", "Birthday", FieldKind::Unknown("date".into()), true);
        let out = render(&field, None, true);
        assert!(out.trim().is_empty());
    }
}
