//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Title and border color
    pub accent: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint text shown at the bottom (e.g., "Press Enter to dismiss")
    pub hint: Option<Line<'a>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    let dialog_width = config.max_width.min(area.width);
    // borders (2) + horizontal padding (2)
    let text_width = dialog_width.saturating_sub(4).max(1);

    let message_rows = wrapped_row_count(config.message, text_width as usize);
    let hint_rows = if config.hint.is_some() { 2 } else { 0 };
    // borders + title + blank line
    let dialog_height = (message_rows + hint_rows + 4).min(area.height);

    let dialog_area = centered(area, dialog_width, dialog_height);
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(config.message.split('\n').map(Line::from));
    if let Some(hint) = config.hint {
        content.push(Line::from(""));
        content.push(hint);
    }

    let dialog = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.accent))
                .padding(Padding::horizontal(1)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

/// Rect of the given size centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Rows needed to show `text` word-wrapped at `width` columns
fn wrapped_row_count(text: &str, width: usize) -> u16 {
    let mut rows = 0u16;
    for paragraph in text.split('\n') {
        let mut line_len = 0usize;
        let mut paragraph_rows = 1u16;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                paragraph_rows += 1;
                line_len = 0;
            }
            if line_len > 0 {
                line_len += 1;
            }
            line_len += word_len;
            // words longer than the line break mid-word
            while line_len > width {
                paragraph_rows += 1;
                line_len -= width;
            }
        }
        rows = rows.saturating_add(paragraph_rows);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_row_count_short_message() {
        assert_eq!(wrapped_row_count("db down", 20), 1);
    }

    #[test]
    fn test_wrapped_row_count_wraps_words() {
        assert_eq!(wrapped_row_count("aaaa bbbb cccc", 9), 2);
    }

    #[test]
    fn test_wrapped_row_count_counts_newlines() {
        assert_eq!(wrapped_row_count("one\n\ntwo", 20), 3);
    }

    #[test]
    fn test_wrapped_row_count_long_word() {
        assert_eq!(wrapped_row_count("abcdefghij", 4), 3);
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, 40, 10);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }
}
