use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::types::{App, AppMode};
use crate::ui::renderers::{render_footer, render_title, SECTION_MESSAGING};
use crate::ui::utils::{format_percent, format_roas};

/// Focused messaging view: full table with a regex search filter.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Filter line
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Messaging");
    render_filter_line(f, app, chunks[1]);
    render_message_table(f, app, chunks[2]);

    let hints = if app.mode == AppMode::EditingFilter {
        "Enter: apply filter | Esc: cancel | Backspace: delete"
    } else {
        "q: quit | 0/Tab: overview/next | /: filter | c: clear filter | Up/Down: scroll"
    };
    render_footer(f, chunks[3], hints);
}

fn render_filter_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.mode == AppMode::EditingFilter {
        Line::from(vec![
            Span::raw("Pattern: "),
            Span::styled(
                format!("{}_", app.filter_input),
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if let Some(filter) = &app.message_filter {
        let kind = if filter.search_regex.is_some() {
            "regex"
        } else {
            "substring"
        };
        Line::from(vec![
            Span::raw("Active filter: "),
            Span::styled(
                filter.term.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " ({}, {} of {} rows)",
                kind,
                app.filtered_messages().len(),
                app.bundle.message_perf.len()
            )),
        ])
    } else {
        Line::from(Span::styled(
            "No filter - press '/' to search",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let paragraph =
        Paragraph::new(line).block(Block::default().title("Search").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_message_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        ["Segment", "Channel", "Message", "CTR", "Conv Rate", "ROAS"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    );

    let rows = app
        .filtered_messages()
        .into_iter()
        .skip(app.message_scroll)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.segment.clone()),
                Cell::from(row.channel.clone()),
                Cell::from(row.message.clone()),
                Cell::from(format_percent(row.ctr)),
                Cell::from(format_percent(row.conversion_rate)),
                Cell::from(format_roas(row.roas)),
            ])
        });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(10), // Segment
            Constraint::Percentage(16), // Channel
            Constraint::Percentage(38), // Message
            Constraint::Percentage(12), // CTR
            Constraint::Percentage(12), // Conversion rate
            Constraint::Percentage(12), // ROAS
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(SECTION_MESSAGING)
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
