use ratatui::{prelude::*, widgets::*};

use crate::{
    App,
    view_models::table::{COLUMN_HEADERS, TableViewModel},
};

/// Render the loaded table: search header, result rows, count footer
pub fn render_table_screen(f: &mut Frame, area: Rect, app: &mut App, vm: &TableViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box + theme indicator
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Result count
        ])
        .split(area);

    render_header(f, chunks[0], app, vm);
    render_records(f, chunks[1], app, vm);
    render_footer(f, chunks[2], app, vm);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, vm: &TableViewModel) {
    let theme = &app.store.state().theme;

    let label_width = vm.theme_label.chars().count() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(label_width)])
        .split(area);

    let border_style = if vm.search_focused {
        theme.panel_border()
    } else {
        Style::default().fg(theme.text_muted)
    };
    let text_style = if vm.search_is_placeholder {
        theme.muted()
    } else {
        Style::default().fg(theme.input_fg)
    };

    let mut spans = vec![Span::styled(vm.search_text.as_str(), text_style)];
    if vm.search_focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.accent_primary)));
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .title(" Search [/] ")
            .border_style(border_style)
            .style(Style::default().bg(theme.input_bg)),
    );
    f.render_widget(search, chunks[0]);

    let theme_toggle = Paragraph::new(Line::from(vec![
        Span::styled(vm.theme_label, Style::default().fg(theme.text_primary)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .title(" t ")
            .border_style(Style::default().fg(theme.text_muted))
            .style(Style::default().bg(theme.bg_secondary)),
    );
    f.render_widget(theme_toggle, chunks[1]);
}

fn render_records(f: &mut Frame, area: Rect, app: &mut App, vm: &TableViewModel) {
    let theme = app.store.state().theme.clone();
    let block = Block::bordered()
        .border_style(Style::default().fg(theme.text_muted))
        .style(Style::default().bg(theme.bg_primary));

    let header = Row::new(COLUMN_HEADERS.iter().map(|h| Cell::from(*h)))
        .style(theme.table_header())
        .height(1);

    if let Some(message) = vm.empty_message {
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(theme.muted())
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let rows = vm.rows.iter().enumerate().map(|(i, row)| {
        let bg = match i % 2 {
            0 => theme.table_row_bg_normal,
            _ => theme.table_row_bg_alt,
        };
        Row::new(row.cells.iter().map(|cell| Cell::from(cell.as_str())))
            .style(Style::new().fg(theme.table_row_fg).bg(bg))
            .height(1)
    });

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(45),
        Constraint::Percentage(35),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.table_selected());

    let table_state = &mut app.store.state_mut().table.table_state;
    f.render_stateful_widget(table, area, table_state);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App, vm: &TableViewModel) {
    let theme = &app.store.state().theme;

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(vm.count_label.as_str(), Style::default().fg(theme.text_secondary)),
        Span::styled("  |  ", theme.muted()),
        Span::styled("?", theme.key_hint()),
        Span::styled(" help", theme.muted()),
    ]))
    .style(Style::default().bg(theme.bg_secondary));

    f.render_widget(footer, area);
}
