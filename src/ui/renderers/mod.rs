pub mod insights;
pub mod messaging;
pub mod model;
pub mod overview;
pub mod segments;
pub mod spend;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::types::App;

pub const DASHBOARD_TITLE: &str = "DEMMA - Digital Media Marketing Agent";
pub const SECTION_MODEL: &str = "Conversion Prediction Model";
pub const SECTION_SPEND: &str = "Spend Optimization";
pub const SECTION_SEGMENTS: &str = "User Segmentation";
pub const SECTION_MESSAGING: &str = "Recommended Messaging by Segment";
pub const MODEL_CAPTION: &str =
    "Random Forest Classifier trained to predict likelihood of user conversion";

/// Render the title bar: dashboard name, bundle timestamp, current view and
/// any pending notification inside the block.
pub fn render_title(f: &mut Frame, app: &App, area: Rect, view_name: &str) {
    let block = Block::default()
        .title(DASHBOARD_TITLE)
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let timestamp = app
        .bundle
        .generated_at
        .map(|t| format!(" | report generated {}", t.format("%Y-%m-%d %H:%M UTC")))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            format!("[{}]", view_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(timestamp),
    ];
    if let Some(message) = &app.notification {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Render the keybinding hint footer shared by the focused views.
pub fn render_footer(f: &mut Frame, area: Rect, hints: &str) {
    let footer = Paragraph::new(hints).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
