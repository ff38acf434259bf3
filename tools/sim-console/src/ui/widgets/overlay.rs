//! Modal overlays: blocking alert and key help.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::ViewId;

/// Render the blocking alert. Any key dismisses it.
pub fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Error ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(paragraph, area);
}

/// Render a centered help overlay.
pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<9}"), Style::default().fg(Color::Yellow)),
            Span::raw(desc.to_string()),
        ])
    };
    let heading = |t: &str| {
        Line::from(Span::styled(
            t.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    let mut text = vec![
        Line::from(Span::styled(
            "SIM-CONSOLE HELP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        heading("Views"),
    ];
    text.extend(ViewId::ALL.iter().map(|v| key(&v.hotkey().to_string(), v.name())));
    text.extend([
        key("←/→", "Previous / next view"),
        Line::raw(""),
        heading("Actions"),
        key("R", "Refresh current view"),
        key("↑/↓", "Scroll, or select account on Wallet"),
        key("I/Enter", "Edit form (Parameters, Wallet)"),
        key("S", "Submit form"),
        key("N", "Mine a block for the selected account"),
        key("Q/Esc", "Quit"),
        key("?", "Toggle this help"),
        Line::raw(""),
        Line::from(Span::styled(
            "Dashboard refreshes automatically while it is showing.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
