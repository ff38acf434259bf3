//! Display fragments produced by the view builders.
//!
//! A fragment is plain data: titled panels of styled lines. Builders are
//! pure so their output can be inspected in tests without a terminal.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sim_analytics::{ConcentrationLevel, HealthBand};

/// One bordered panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub accent: Color,
    pub lines: Vec<Line<'static>>,
}

impl Panel {
    pub fn new(title: impl Into<String>, accent: Color) -> Self {
        Self {
            title: title.into(),
            accent,
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: Line<'static>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = Line<'static>>) -> Self {
        self.lines.extend(lines);
        self
    }

    fn height(&self) -> u16 {
        self.lines.len() as u16 + 2
    }
}

/// The full body of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFragment {
    /// Panels per row.
    pub columns: usize,
    pub panels: Vec<Panel>,
}

impl ViewFragment {
    pub fn grid(columns: usize, panels: Vec<Panel>) -> Self {
        Self {
            columns: columns.max(1),
            panels,
        }
    }

    pub fn single(panel: Panel) -> Self {
        Self::grid(1, vec![panel])
    }

    /// A one-line message standing in for the whole body.
    pub fn placeholder(title: &str, text: impl Into<String>) -> Self {
        Self::single(Panel::new(title, Color::DarkGray).line(muted(text)))
    }

    /// Text content with styling stripped, one line per row.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for panel in &self.panels {
            out.push_str(&panel.title);
            out.push('\n');
            for line in &panel.lines {
                for span in &line.spans {
                    out.push_str(&span.content);
                }
                out.push('\n');
            }
        }
        out
    }

    /// Largest useful scroll offset: the scrolling row's longest panel
    /// stops with its final line at the top.
    pub fn max_scroll(&self) -> u16 {
        self.panels
            .chunks(self.columns)
            .last()
            .and_then(|row| row.iter().map(|p| p.lines.len()).max())
            .map_or(0, |n| n.saturating_sub(1).min(u16::MAX as usize) as u16)
    }

    /// Lay panels out in rows; the last row takes the remaining height and
    /// scrolls.
    pub fn render(&self, frame: &mut Frame, area: Rect, scroll: u16) {
        let rows: Vec<&[Panel]> = self.panels.chunks(self.columns).collect();
        if rows.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if i + 1 == rows.len() {
                    Constraint::Min(3)
                } else {
                    Constraint::Length(row.iter().map(Panel::height).max().unwrap_or(3))
                }
            })
            .collect();
        let row_areas = Layout::vertical(constraints).split(area);

        for (i, (row, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
            let cells = Layout::horizontal(vec![
                Constraint::Ratio(1, self.columns as u32);
                self.columns
            ])
            .split(*row_area);

            let offset = if i + 1 == rows.len() { scroll } else { 0 };
            for (panel, cell) in row.iter().zip(cells.iter()) {
                render_panel(frame, *cell, panel, offset);
            }
        }
    }
}

fn render_panel(frame: &mut Frame, area: Rect, panel: &Panel, scroll: u16) {
    let paragraph = Paragraph::new(panel.lines.clone())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(format!(" {} ", panel.title))
                .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(panel.accent)),
        );

    frame.render_widget(paragraph, area);
}

/// `  Label: value` line.
pub fn kv(label: &str, value: impl Into<String>) -> Line<'static> {
    kv_styled(label, value, Style::default().fg(Color::White))
}

pub fn kv_styled(label: &str, value: impl Into<String>, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value.into(), style),
    ])
}

/// Large bold headline figure.
pub fn headline(value: impl Into<String>, caption: &str, color: Color) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("  {}", value.into()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {caption}"),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

pub fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text.into()),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Status dot followed by a label.
pub fn status(label: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ● ", Style::default().fg(color)),
        Span::styled(label.to_string(), Style::default().fg(color)),
    ])
}

/// Text progress bar line; `percent` is clamped to 0..=100 for drawing only.
pub fn gauge(percent: f64, width: usize, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(progress_bar(percent, width), Style::default().fg(color)),
    ])
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

pub fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Healthy => Color::Green,
        HealthBand::Warning => Color::Yellow,
        HealthBand::Critical => Color::Red,
    }
}

pub fn concentration_color(level: ConcentrationLevel) -> Color {
    match level {
        ConcentrationLevel::Low => Color::Green,
        ConcentrationLevel::Medium => Color::Yellow,
        ConcentrationLevel::High | ConcentrationLevel::VeryHigh => Color::Red,
    }
}

/// `1234.5` → `1234.50 SIM`.
pub fn sim(amount: f64) -> String {
    format!("{amount:.2} SIM")
}

/// Unix seconds in the local timezone.
pub fn local_time(timestamp: f64) -> String {
    use chrono::{Local, TimeZone};

    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract() * 1e9) as u32;
    match Local.timestamp_opt(secs, nanos).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50.0, 10), "█████░░░░░");
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn test_plain_text_strips_styles() {
        let fragment = ViewFragment::single(Panel::new("Stats", Color::Cyan).line(kv("Blocks", "3")));
        assert_eq!(fragment.plain_text(), "Stats\n  Blocks: 3\n");
    }

    #[test]
    fn test_max_scroll_tracks_last_row() {
        let short = Panel::new("Summary", Color::Cyan).line(kv("Pending", "2"));
        let long = Panel::new("List", Color::Green)
            .lines((0..6).map(|i| kv("Row", i.to_string())));

        assert_eq!(ViewFragment::grid(1, vec![short.clone(), long]).max_scroll(), 5);
        assert_eq!(ViewFragment::single(short).max_scroll(), 0);
        assert_eq!(ViewFragment::grid(1, vec![]).max_scroll(), 0);
    }

    #[test]
    fn test_sim_amount() {
        assert_eq!(sim(12.0), "12.00 SIM");
    }

    #[test]
    fn test_local_time_rejects_out_of_range() {
        assert_eq!(local_time(f64::MAX), "N/A");
        assert_ne!(local_time(1_700_000_000.0), "N/A");
    }
}
