//! Terminal rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ SIM-CONSOLE │ 1 Dashboard │ 2 Analytics │ ...   Last refresh: … │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  active view body (ViewFragment panels)                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  flash messages                                                 │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  [1-8] Views  [R] Refresh  [?] Help  [Q] Quit                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod fragment;
pub mod views;
pub mod widgets;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::domain::{App, FlashPhase, InputMode, Severity, ViewId};

/// Flash lines shown at once; the newest win.
const MAX_FLASH_LINES: usize = 3;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let flash_height = app.flash.len().min(MAX_FLASH_LINES) as u16;

    let [header, body, flash, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(flash_height),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    views::body(app, app.active_view).render(frame, body, app.scroll);
    render_flash(frame, flash, app);
    render_footer(frame, footer, app);

    if let Some(message) = &app.alert {
        widgets::render_alert(frame, message);
    } else if app.show_help {
        widgets::render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " SIM-CONSOLE ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let status = match app.last_refresh {
        Some(time) => format!(" Last refresh: {} ", time.format("%H:%M:%S")),
        None => " No data ".to_string(),
    };
    let [tabs_area, status_area] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(status.len() as u16)])
            .areas(block.inner(area));
    frame.render_widget(block, area);

    let titles = ViewId::ALL
        .iter()
        .map(|v| Line::from(format!("{} {}", v.hotkey(), v.name())));
    let tabs = Tabs::new(titles)
        .select(app.active_view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, tabs_area);

    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::default().fg(Color::DarkGray))),
        status_area,
    );
}

fn render_flash(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let hidden = app.flash.len().saturating_sub(MAX_FLASH_LINES);
    let lines: Vec<Line> = app
        .flash
        .messages()
        .skip(hidden)
        .map(|m| {
            let (icon, color) = match m.severity {
                Severity::Success => ("✓", Color::Green),
                Severity::Error => ("✗", Color::Red),
                Severity::Info => ("ℹ", Color::Cyan),
            };
            let mut style = Style::default().fg(color);
            if m.phase == FlashPhase::Fading {
                style = style.add_modifier(Modifier::DIM);
            }
            Line::from(Span::styled(format!(" {icon} {}", m.text), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let spans = match app.mode {
        InputMode::Editing => vec![
            Span::styled(
                " EDITING ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled("[Tab]", key),
            Span::raw(" Next field  "),
            Span::styled("[Enter]", key),
            Span::raw(" Submit  "),
            Span::styled("[Esc]", key),
            Span::raw(" Done"),
        ],
        InputMode::Normal => vec![
            Span::styled(" [1-8]", key),
            Span::raw(" Views  "),
            Span::styled("[↑↓]", key),
            Span::raw(" Scroll  "),
            Span::styled("[R]", key),
            Span::raw(" Refresh  "),
            Span::styled("[?]", key),
            Span::raw(" Help  "),
            Span::styled("[Q]", key),
            Span::raw(" Quit"),
        ],
    };

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_tabs_and_loading_body() {
        let mut app = App::new(&ConsoleConfig::default());
        app.select(ViewId::DEFAULT);

        let text = screen(&app);
        assert!(text.contains("1 Dashboard"));
        assert!(text.contains("8 Wallet"));
        assert!(text.contains("Loading dashboard..."));
    }

    #[test]
    fn test_renders_flash_and_alert() {
        let mut app = App::new(&ConsoleConfig::default());
        app.notify("Parameters updated successfully", Severity::Success, Instant::now());
        app.raise_alert("Failed to update parameters");

        let text = screen(&app);
        assert!(text.contains("Parameters updated successfully"));
        assert!(text.contains("Failed to update parameters"));
        assert!(text.contains("Press any key to dismiss"));
    }

    #[test]
    fn test_newest_flash_is_drawn_when_queue_overflows() {
        let mut app = App::new(&ConsoleConfig::default());
        let now = Instant::now();
        for text in ["first notice", "second notice", "third notice"] {
            app.notify(text, Severity::Info, now);
        }
        app.notify("Amount must be greater than 0", Severity::Error, now);

        let text = screen(&app);
        assert!(text.contains("Amount must be greater than 0"));
        assert!(text.contains("third notice"));
        assert!(!text.contains("first notice"));
    }
}
