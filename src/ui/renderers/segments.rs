use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::types::App;
use crate::ui::charts;
use crate::ui::renderers::{render_footer, render_title, SECTION_SEGMENTS};

/// Focused segmentation view: full-height histogram plus a counts table.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Chart + table
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Segments");

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Histogram
            Constraint::Percentage(40), // Counts table
        ])
        .split(chunks[1]);

    charts::render_segment_chart(f, app, halves[0], SECTION_SEGMENTS);
    render_counts_table(f, app, halves[1]);

    render_footer(f, chunks[2], "q: quit | 0/Tab: overview/next | v: values");
}

fn render_counts_table(f: &mut Frame, app: &App, area: Rect) {
    let total: u64 = app.report.segment_counts.iter().map(|c| c.users).sum();

    let rows = app.report.segment_counts.iter().map(|entry| {
        let share = if total > 0 {
            entry.users as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Row::new(vec![
            Cell::from(entry.segment.clone()),
            Cell::from(entry.users.to_string()),
            Cell::from(format!("{:.1}%", share)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Segment
            Constraint::Length(8),  // Users
            Constraint::Length(8),  // Share
        ],
    )
    .header(
        Row::new(vec!["Segment", "Users", "Share"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title("Segment Counts").borders(Borders::ALL));
    f.render_widget(table, area);
}
