//! UI module for rendering the TUI

mod components;
mod forms;
mod home;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    match &app.state.current_view {
        View::Wizard => forms::draw_wizard(frame, main_area, app),
        View::Home(home) => home::draw(frame, main_area, *home),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Modal error on top of everything
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
