pub mod charts;
pub mod input;
pub mod renderers;
pub mod terminal;
pub mod utils;

use std::io;

use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::types::{App, AppMode};

// Re-export the main public functions
pub use terminal::{restore_terminal, setup_terminal};

/// Main UI rendering function that delegates to specific mode renderers
pub fn render_ui(
    app: &App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw a single frame. Split out from `render_ui` so integration tests can
/// drive it against a `TestBackend`.
pub fn draw(f: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Overview => renderers::overview::render(f, app),
        AppMode::Model => renderers::model::render(f, app),
        AppMode::Spend => renderers::spend::render(f, app),
        AppMode::Segments => renderers::segments::render(f, app),
        AppMode::Messaging | AppMode::EditingFilter => renderers::messaging::render(f, app),
        AppMode::Insights => renderers::insights::render(f, app),
    }
}
