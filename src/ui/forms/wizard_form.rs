//! Onboarding wizard rendering

use super::field_renderer::{draw_field, field_height};
use crate::app::{App, INCOMPLETE_STEP_MESSAGE};
use crate::state::{WizardButton, WizardForm};
use crate::ui::components::{render_button, BUTTON_HEIGHT, BUTTON_WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Maximum width of the wizard panel
const PANEL_WIDTH: u16 = 72;

/// Draw the wizard view in whatever phase it is in
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let panel = centered_panel(area);

    if app.state.is_loading {
        draw_message(frame, panel, "Loading...", Color::DarkGray);
        return;
    }
    if let Some(error) = &app.state.load_error {
        let text = format!("{error}\n\nPress r to retry or q to quit.");
        draw_message(frame, panel, &text, Color::Red);
        return;
    }
    if let Some(form) = &app.state.form {
        draw_form(frame, panel, form);
    }
}

fn centered_panel(area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

fn draw_message(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let block = Block::default()
        .title(" Onboarding ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_form(frame: &mut Frame, area: Rect, form: &WizardForm) {
    let title = if form.step_count() == 0 {
        " Onboarding ".to_string()
    } else {
        format!(
            " Onboarding - Step {} of {} ",
            form.current_step + 1,
            form.step_count()
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = form.current_fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(field_height(&f.kind)))
        .collect();
    constraints.push(Constraint::Length(1)); // Validation warning
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Buttons
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    for (idx, field) in fields.iter().enumerate() {
        let is_active = idx == form.active_field_index;
        draw_field(frame, chunks[idx], field, form.value(&field.name), is_active);
    }

    let can_proceed = form.can_proceed();
    if !can_proceed {
        let warning = Paragraph::new(Line::from(Span::styled(
            INCOMPLETE_STEP_MESSAGE,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(warning, chunks[fields.len()]);
    }

    draw_buttons(frame, chunks[fields.len() + 1], form, can_proceed);
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &WizardForm, can_proceed: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BUTTON_WIDTH), // Back
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH), // Next / Finish
        ])
        .split(area);

    let buttons_focused = form.is_buttons_row_active();

    if !form.is_first_step() {
        render_button(
            frame,
            chunks[0],
            "Back",
            buttons_focused && form.selected_button == WizardButton::Back,
            true,
        );
    }

    // No step at all means nothing to proceed to
    if form.step_count() == 0 {
        return;
    }
    let label = if form.is_last_step() { "Finish" } else { "Next" };
    render_button(
        frame,
        chunks[2],
        label,
        buttons_focused && form.selected_button == WizardButton::Proceed,
        can_proceed,
    );

    if !can_proceed {
        let hint = Paragraph::new(Span::styled(
            "(disabled)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Right);
        let hint_area = Rect {
            y: chunks[1].y + 1,
            height: 1,
            ..chunks[1]
        };
        frame.render_widget(hint, hint_area);
    }
}
