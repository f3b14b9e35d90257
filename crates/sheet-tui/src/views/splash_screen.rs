use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    prelude::*,
    widgets::*,
};

use crate::theme::Theme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Center a box of at most `width` x `height` inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Draw the titled panel and return the area left for its body
fn panel(f: &mut Frame, area: Rect, theme: &Theme, border: Color) -> Rect {
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let centered_area = centered(area, 50, 9);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg_panel)),
        centered_area,
    );

    let inner = centered_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Title underline
            Constraint::Length(1), // Spacing
            Constraint::Min(2),    // Body
        ])
        .split(inner);

    let title = Paragraph::new("Sheet Functions")
        .style(
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let underline = Paragraph::new("───────────────")
        .style(Style::default().fg(theme.accent_secondary))
        .alignment(Alignment::Center);
    f.render_widget(underline, chunks[1]);

    chunks[3]
}

/// Loading panel shown while a fetch is in flight
pub fn render_loading(f: &mut Frame, area: Rect, theme: &Theme, spinner_frame: usize) {
    let body = panel(f, area, theme, theme.accent_primary);

    let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
    let text = Paragraph::new(format!("{} Loading data...", spinner))
        .style(
            Style::default()
                .fg(theme.status_warning)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(text, body);
}

/// Failure panel with the error message and the retry key
pub fn render_error(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let body = panel(f, area, theme, theme.status_error);

    let lines = vec![
        Line::from(Span::styled(format!("Error: {}", message), theme.error())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", theme.muted()),
            Span::styled("r", theme.key_hint()),
            Span::styled(" to retry", theme.muted()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, body);
}
