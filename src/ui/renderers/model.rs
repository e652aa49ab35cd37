use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::types::App;
use crate::ui::charts;
use crate::ui::renderers::{render_footer, render_title, MODEL_CAPTION, SECTION_MODEL};

/// Focused view of the conversion model: scrollable classification report
/// plus a per-class F1 chart.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(0),     // Classification report
            Constraint::Length(12), // F1 chart
            Constraint::Length(3),  // Footer
        ])
        .split(f.size());

    render_title(f, app, chunks[0], "Model");

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
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Evaluated on {} held-out users | accuracy {:.2}",
        app.report.total_support, app.report.accuracy
    )));

    let report = Paragraph::new(Text::from(lines))
        .block(Block::default().title(SECTION_MODEL).borders(Borders::ALL))
        .scroll((app.model_scroll as u16, 0));
    f.render_widget(report, chunks[1]);

    charts::render_f1_chart(f, app, chunks[2]);

    render_footer(
        f,
        chunks[3],
        "q: quit | 0/Tab: overview/next | Up/Down: scroll report",
    );
}
