//! Checkout card form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{Form, PaymentForm};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Widest the form is drawn, centered in wider terminals
const FORM_MAX_WIDTH: u16 = 76;

/// Draw the card form with its submit button
pub fn draw_payment_form(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.min(FORM_MAX_WIDTH);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let block = Block::default()
        .title(" Credit Card Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Banner
            Constraint::Length(FIELD_HEIGHT),  // Name
            Constraint::Length(FIELD_HEIGHT),  // Card number
            Constraint::Length(FIELD_HEIGHT),  // Expiry date
            Constraint::Length(FIELD_HEIGHT),  // CVV
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    let banner = Paragraph::new(Line::from(Span::styled(
        app.config.banner(),
        Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    for index in 0..4 {
        draw_input(frame, chunks[index + 1], app, index);
    }

    render_button(
        frame,
        chunks[5],
        "Submit Payment",
        app.state.form.is_submit_row_active(),
        Some(Color::Blue),
    );
}

/// Draw the input at `index` of the form
fn draw_input(frame: &mut Frame, area: Rect, app: &App, index: usize) {
    let form: &PaymentForm = &app.state.form;
    if let Some(field) = form.get_field(index) {
        draw_field(
            frame,
            area,
            field,
            form.active_field() == index,
            app.state.field_errors.get(field.key),
            app.config.mask_cvv(),
        );
    }
}
