use ::log::Level;
use ratatui::{prelude::*, widgets::*};

use crate::{log_capture::LogEntry, state::DebugConsoleState, theme::Theme};

/// Render the debug console as a Quake-style drop-down panel
/// Returns the visible viewport height for page down scrolling
pub fn render_debug_console(
    f: &mut Frame,
    area: Rect,
    console: &DebugConsoleState,
    theme: &Theme,
) -> usize {
    let console_height = (area.height * console.height_percent / 100).min(area.height);
    let console_area = Rect {
        height: console_height,
        ..area
    };

    f.render_widget(Clear, console_area);

    // Border plus title rows
    let visible_height = console_height.saturating_sub(3) as usize;

    let total_logs = console.logs.len();
    let scroll_offset = first_visible(total_logs, visible_height, console);

    let items: Vec<ListItem> = console
        .logs
        .window(scroll_offset, visible_height)
        .iter()
        .map(|entry| ListItem::new(format_entry(entry)).style(Style::default().fg(level_color(entry.level, theme))))
        .collect();

    let list = List::new(items).block(
        Block::bordered()
            .title(format!(
                " Debug Console ({}/{}) {} ",
                scroll_offset + visible_height.min(total_logs),
                total_logs,
                if console.auto_scroll { "[AUTO]" } else { "[MANUAL]" }
            ))
            .title_bottom(" ` Close | j/k Scroll | a Auto-scroll | c Clear ")
            .border_style(Style::default().fg(theme.accent_primary))
            .style(Style::default().bg(theme.bg_secondary)),
    );

    f.render_widget(list, console_area);

    visible_height
}

/// Index of the first log line shown
fn first_visible(total: usize, visible: usize, console: &DebugConsoleState) -> usize {
    let max_offset = total.saturating_sub(visible);
    if console.auto_scroll {
        max_offset
    } else {
        console.scroll_offset.min(max_offset)
    }
}

fn level_color(level: Level, theme: &Theme) -> Color {
    match level {
        Level::Error => theme.status_error,
        Level::Warn => theme.status_warning,
        Level::Info => theme.text_primary,
        Level::Debug => theme.text_secondary,
        Level::Trace => theme.text_muted,
    }
}

fn format_entry(entry: &LogEntry) -> String {
    let target = if entry.target.chars().count() > 20 {
        let head: String = entry.target.chars().take(17).collect();
        format!("{}...", head)
    } else {
        format!("{:20}", entry.target)
    };

    format!(
        "{} {:5} {} {}",
        entry.timestamp.format("%H:%M:%S%.3f"),
        entry.level.to_string().to_uppercase(),
        target,
        entry.message
    )
}
