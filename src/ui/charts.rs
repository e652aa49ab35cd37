use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use crate::types::App;
use crate::ui::utils::{format_currency, truncate_label};

const BAR_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Render optimized spend per channel as a bar chart.
pub fn render_channel_spend_chart(f: &mut Frame, app: &App, area: Rect, title: &str) {
    let bars: Vec<Bar> = app
        .report
        .channel_spend
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let text_value = if app.show_values {
                format_currency(entry.optimized_spend)
            } else {
                String::new() // hide numeric value
            };
            Bar::default()
                .value(entry.optimized_spend.round() as u64)
                .label(truncate_label(&entry.channel, 10).into())
                .text_value(text_value)
                .style(Style::default().fg(BAR_COLORS[i % BAR_COLORS.len()]))
        })
        .collect();

    let max = app
        .report
        .channel_spend
        .iter()
        .map(|entry| entry.optimized_spend.round() as u64)
        .max()
        .unwrap_or(1)
        .max(1);

    let chart = BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(2)
        .max(max)
        .label_style(Style::default().fg(Color::White));
    f.render_widget(chart, area);
}

/// Render the user-segmentation histogram. Bar heights are exactly the
/// per-segment user counts.
pub fn render_segment_chart(f: &mut Frame, app: &App, area: Rect, title: &str) {
    let bars: Vec<Bar> = app
        .report
        .segment_counts
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let text_value = if app.show_values {
                entry.users.to_string()
            } else {
                String::new()
            };
            Bar::default()
                .value(entry.users)
                .label(truncate_label(&entry.segment, 10).into())
                .text_value(text_value)
                .style(Style::default().fg(BAR_COLORS[i % BAR_COLORS.len()]))
        })
        .collect();

    let max = app
        .report
        .segment_counts
        .iter()
        .map(|entry| entry.users)
        .max()
        .unwrap_or(1)
        .max(1);

    let chart = BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .max(max)
        .label_style(Style::default().fg(Color::White));
    f.render_widget(chart, area);
}

/// Render per-class F1 scores (scaled to percent) for the model view.
pub fn render_f1_chart(f: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = app
        .report
        .classes
        .iter()
        .enumerate()
        .map(|(i, class)| {
            Bar::default()
                .value((class.f1 * 100.0).round() as u64)
                .label(format!("class {}", class.label).into())
                .text_value(format!("{:.2}", class.f1))
                .style(Style::default().fg(BAR_COLORS[i % BAR_COLORS.len()]))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("F1 Score by Class")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .max(100)
        .label_style(Style::default().fg(Color::White));
    f.render_widget(chart, area);
}
