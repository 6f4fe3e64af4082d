//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{PASTE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::CheckoutPhase;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the navigation header above the form
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Checkout ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" › Purchase", Style::default().fg(Color::Gray)),
    ]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let phase = match &app.state.phase {
        CheckoutPhase::Editing => Span::styled(" ○ ", Style::default().fg(Color::Yellow)),
        CheckoutPhase::Submitted(receipt) => Span::styled(
            format!(" ● ref {} ", receipt.short_reference()),
            Style::default().fg(Color::Green),
        ),
    };
    spans.push(phase);

    spans.push(Span::styled(
        get_hints(),
        Style::default().fg(Color::Gray),
    ));

    let failing = app.state.field_errors.len();
    if failing > 0 {
        let noun = if failing == 1 { "field" } else { "fields" };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{failing} {noun} need attention"),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for the checkout form
fn get_hints() -> String {
    format!("Tab:next  Enter:submit  {SUBMIT_SHORTCUT}:submit  {PASTE_SHORTCUT}:paste  Esc:quit")
}
