//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one input: bordered box plus the error line under it
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a single-line input with its validation message below it
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
    mask_secrets: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Error text
        ])
        .split(area);

    let border_style = match (is_active, error.is_some()) {
        (true, _) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Red),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = field.display_value(mask_secrets);
    let mut spans = vec![if display_value.is_empty() && !is_active {
        Span::styled(field.key.label(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(display_value, value_style)
    }];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let title = if error.is_some() {
        format!(" {} * ", field.key.label())
    } else {
        format!(" {} ", field.key.label())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error_line, chunks[1]);
    }
}
