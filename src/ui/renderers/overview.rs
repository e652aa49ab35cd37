use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::narrative;
use crate::types::App;
use crate::ui::charts;
use crate::ui::renderers::{
    render_title, MODEL_CAPTION, SECTION_MESSAGING, SECTION_MODEL, SECTION_SEGMENTS, SECTION_SPEND,
};
use crate::ui::utils::{format_currency, format_percent, format_roas};

/// Render the single-page report: all five sections stacked in fixed order.
pub fn render(f: &mut Frame, app: &App) {
    let model_height = app.report.classes.len() as u16 + 9;
    let spend_height = (app.bundle.summary.len() as u16 + 3).max(10);
    let messaging_height = app.bundle.message_perf.len() as u16 + 3;
    let insights_height = narrative::INSIGHT_BULLETS.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),                // Title (header with navigation)
            Constraint::Length(model_height),     // 1. Conversion prediction model
            Constraint::Length(spend_height),     // 2. Spend optimization
            Constraint::Length(10),               // 3. User segmentation
            Constraint::Length(messaging_height), // 4. Recommended messaging
            Constraint::Length(insights_height),  // 5. Example AI insights
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Overview");
    render_model_section(f, app, chunks[1]);
    render_spend_section(f, app, chunks[2]);
    charts::render_segment_chart(f, app, chunks[3], SECTION_SEGMENTS);
    render_messaging_section(f, app, chunks[4]);
    render_insights_section(f, chunks[5]);
}

/// Caption plus the preformatted classification report.
fn render_model_section(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            MODEL_CAPTION,
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    lines.extend(
        app.report
            .classification_text
            .lines()
            .map(|l| Line::from(l.to_string())),
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title(SECTION_MODEL).borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Spend table (bundle order, row-for-row) beside the per-channel bar chart.
fn render_spend_section(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(SECTION_SPEND).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Table
            Constraint::Percentage(38), // Channel chart
        ])
        .split(inner);

    let header = Row::new(
        ["Channel", "Campaign", "Message", "ROAS", "Optimized Spend"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    );
    let rows = app.bundle.summary.iter().map(|row| {
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
    .header(header);
    f.render_widget(table, halves[0]);

    charts::render_channel_spend_chart(f, app, halves[1], "Optimized Spend by Channel");
}

fn render_messaging_section(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(
        ["Segment", "Channel", "Message", "CTR", "Conv Rate", "ROAS"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)))
            .collect::<Vec<_>>(),
    );
    let rows = app.bundle.message_perf.iter().map(|row| {
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

/// The static insights block; identical on every render.
fn render_insights_section(f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = narrative::INSIGHT_BULLETS
        .iter()
        .map(|bullet| ListItem::new(Line::from(format!("- {}", bullet))))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(narrative::INSIGHTS_TITLE)
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}
