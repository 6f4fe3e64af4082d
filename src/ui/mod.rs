//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    forms::draw_payment_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Collaborator failures overlay everything until dismissed
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
