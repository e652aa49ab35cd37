use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::types::{App, SortColumn, SortDirection};
use crate::ui::charts;
use crate::ui::renderers::{render_footer, render_title, SECTION_SPEND};
use crate::ui::utils::{format_currency, format_roas};

/// Focused spend-optimization view: sortable full table plus channel chart.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Table + chart
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Spend");

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Table
            Constraint::Percentage(38), // Channel chart
        ])
        .split(chunks[1]);

    render_spend_table(f, app, halves[0]);
    charts::render_channel_spend_chart(f, app, halves[1], "Optimized Spend by Channel");

    render_footer(
        f,
        chunks[2],
        "q: quit | 0/Tab: overview/next | c/a/r/s: sort (repeat to flip) | Up/Down: scroll | v: values",
    );
}

fn sort_marker(app: &App, column: SortColumn) -> &'static str {
    if app.sort_by == column {
        match app.sort_direction {
            SortDirection::Asc => " ^",
            SortDirection::Desc => " v",
        }
    } else {
        ""
    }
}

fn render_spend_table(f: &mut Frame, app: &App, area: Rect) {
    let header_cells: Vec<Cell> = vec![
        Cell::from(format!("(C)hannel{}", sort_marker(app, SortColumn::Channel))),
        Cell::from(format!(
            "C(a)mpaign{}",
            sort_marker(app, SortColumn::Campaign)
        )),
        Cell::from("Message"),
        Cell::from(format!("(R)OAS{}", sort_marker(app, SortColumn::Roas))),
        Cell::from(format!(
            "(S)pend{}",
            sort_marker(app, SortColumn::OptimizedSpend)
        )),
    ]
    .into_iter()
    .map(|c| c.style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
    .collect();

    let rows = app
        .sorted_spend()
        .into_iter()
        .skip(app.spend_scroll)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.channel.clone()),
                Cell::from(row.campaign.clone()),
                Cell::from(row.message.clone()),
                Cell::from(format_roas(row.roas)),
                Cell::from(format_currency(row.optimized_spend)),
            ])
        });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18), // Channel
            Constraint::Percentage(18), // Campaign
            Constraint::Percentage(30), // Message
            Constraint::Percentage(12), // ROAS
            Constraint::Percentage(22), // Optimized spend
        ],
    )
    .header(Row::new(header_cells))
    .block(Block::default().title(SECTION_SPEND).borders(Borders::ALL));
    f.render_widget(table, area);
}
