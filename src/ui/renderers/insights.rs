use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::narrative;
use crate::types::App;
use crate::ui::renderers::{render_footer, render_title};

/// Focused view of the static narrative insights.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Bullet list
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Insights");

    let items: Vec<ListItem> = narrative::INSIGHT_BULLETS
        .iter()
        .map(|bullet| {
            ListItem::new(Line::from(vec![
                Span::styled("- ", Style::default().fg(Color::Cyan)),
                Span::raw(*bullet),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(narrative::INSIGHTS_TITLE)
            .borders(Borders::ALL),
    );
    f.render_widget(list, chunks[1]);

    render_footer(f, chunks[2], "q: quit | 0/Tab: overview/next");
}
