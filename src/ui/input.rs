use crossterm::event::KeyCode;

use crate::types::{App, AppMode, MessageFilter, SortColumn};

/// Handle keyboard input events for all application modes. Returns true when
/// the app should quit.
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match app.mode {
        AppMode::EditingFilter => handle_filter_editing_keys(app, key),
        AppMode::Spend => handle_spend_keys(app, key),
        AppMode::Messaging => handle_messaging_keys(app, key),
        AppMode::Model => handle_model_keys(app, key),
        AppMode::Overview | AppMode::Segments | AppMode::Insights => {
            handle_common_keys(app, key)
        }
    }
}

fn next_mode(mode: AppMode) -> AppMode {
    match mode {
        AppMode::Overview => AppMode::Model,
        AppMode::Model => AppMode::Spend,
        AppMode::Spend => AppMode::Segments,
        AppMode::Segments => AppMode::Messaging,
        AppMode::Messaging | AppMode::EditingFilter => AppMode::Insights,
        AppMode::Insights => AppMode::Overview,
    }
}

/// Keys shared by every non-editing view: quit, section hotkeys, toggles.
fn handle_common_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true, // Signal to quit
        KeyCode::Char('0') => app.mode = AppMode::Overview,
        KeyCode::Char('1') => app.mode = AppMode::Model,
        KeyCode::Char('2') => app.mode = AppMode::Spend,
        KeyCode::Char('3') => app.mode = AppMode::Segments,
        KeyCode::Char('4') => app.mode = AppMode::Messaging,
        KeyCode::Char('5') => app.mode = AppMode::Insights,
        KeyCode::Tab => app.mode = next_mode(app.mode),
        KeyCode::Char('v') => app.show_values = !app.show_values,
        _ => {}
    }
    false
}

fn handle_model_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up => {
            app.model_scroll = app.model_scroll.saturating_sub(1);
            false
        }
        KeyCode::Down => {
            let max = app.report.classification_text.lines().count();
            app.model_scroll = (app.model_scroll + 1).min(max);
            false
        }
        other => handle_common_keys(app, other),
    }
}

fn handle_spend_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('c') => {
            app.toggle_sort(SortColumn::Channel);
            false
        }
        KeyCode::Char('a') => {
            app.toggle_sort(SortColumn::Campaign);
            false
        }
        KeyCode::Char('r') => {
            app.toggle_sort(SortColumn::Roas);
            false
        }
        KeyCode::Char('s') => {
            app.toggle_sort(SortColumn::OptimizedSpend);
            false
        }
        KeyCode::Up => {
            app.spend_scroll = app.spend_scroll.saturating_sub(1);
            false
        }
        KeyCode::Down => {
            let max = app.bundle.summary.len().saturating_sub(1);
            app.spend_scroll = (app.spend_scroll + 1).min(max);
            false
        }
        other => handle_common_keys(app, other),
    }
}

fn handle_messaging_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('/') => {
            // Enter search mode, seeding the input with the current term
            app.filter_input = app
                .message_filter
                .as_ref()
                .map(|f| f.term.clone())
                .unwrap_or_default();
            app.mode = AppMode::EditingFilter;
            false
        }
        KeyCode::Char('c') => {
            app.message_filter = None;
            app.message_scroll = 0;
            false
        }
        KeyCode::Up => {
            app.message_scroll = app.message_scroll.saturating_sub(1);
            false
        }
        KeyCode::Down => {
            let max = app.filtered_messages().len().saturating_sub(1);
            app.message_scroll = (app.message_scroll + 1).min(max);
            false
        }
        other => handle_common_keys(app, other),
    }
}

/// Text entry for the messaging search filter.
fn handle_filter_editing_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char(c) => {
            app.filter_input.push(c);
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Esc => {
            app.filter_input.clear();
            app.mode = AppMode::Messaging;
        }
        KeyCode::Enter => {
            let term = app.filter_input.trim().to_string();
            if term.is_empty() {
                app.message_filter = None;
            } else {
                let filter = MessageFilter::new(term);
                if filter.search_regex.is_none() {
                    app.notify("Invalid regex - matching as plain text".to_string());
                }
                app.message_filter = Some(filter);
            }
            app.filter_input.clear();
            app.message_scroll = 0;
            app.mode = AppMode::Messaging;
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::sample_bundle;
    use crate::report::Report;

    fn test_app() -> App {
        let bundle = sample_bundle();
        let report = Report::compute(&bundle);
        App::new(bundle, report, false)
    }

    #[test]
    fn digit_keys_switch_sections() {
        let mut app = test_app();
        assert!(!handle_key_event(&mut app, KeyCode::Char('4')));
        assert_eq!(app.mode, AppMode::Messaging);
        assert!(!handle_key_event(&mut app, KeyCode::Char('0')));
        assert_eq!(app.mode, AppMode::Overview);
    }

    #[test]
    fn tab_cycles_through_all_views() {
        let mut app = test_app();
        let mut seen = vec![app.mode];
        for _ in 0..6 {
            handle_key_event(&mut app, KeyCode::Tab);
            seen.push(app.mode);
        }
        assert_eq!(seen.first(), seen.last());
        assert!(seen.contains(&AppMode::Insights));
        assert!(seen.contains(&AppMode::Spend));
    }

    #[test]
    fn q_quits_from_any_view() {
        let mut app = test_app();
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
        app.mode = AppMode::Segments;
        assert!(handle_key_event(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn filter_flow_applies_and_cancels() {
        let mut app = test_app();
        app.mode = AppMode::Messaging;
        handle_key_event(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, AppMode::EditingFilter);

        for c in "LinkedIn".chars() {
            handle_key_event(&mut app, KeyCode::Char(c));
        }
        handle_key_event(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Messaging);
        let filtered = app.filtered_messages();
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|row| row.channel == "LinkedIn"));

        handle_key_event(&mut app, KeyCode::Char('c'));
        assert!(app.message_filter.is_none());
        assert_eq!(
            app.filtered_messages().len(),
            app.bundle.message_perf.len()
        );
    }

    #[test]
    fn esc_leaves_filter_untouched() {
        let mut app = test_app();
        app.mode = AppMode::Messaging;
        handle_key_event(&mut app, KeyCode::Char('/'));
        handle_key_event(&mut app, KeyCode::Char('x'));
        handle_key_event(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Messaging);
        assert!(app.message_filter.is_none());
    }

    #[test]
    fn spend_sort_keys_change_column() {
        let mut app = test_app();
        app.mode = AppMode::Spend;
        handle_key_event(&mut app, KeyCode::Char('r'));
        assert_eq!(app.sort_by, SortColumn::Roas);
        handle_key_event(&mut app, KeyCode::Char('c'));
        assert_eq!(app.sort_by, SortColumn::Channel);
    }

    #[test]
    fn invalid_pattern_sets_notification() {
        let mut app = test_app();
        app.mode = AppMode::Messaging;
        handle_key_event(&mut app, KeyCode::Char('/'));
        for c in "([".chars() {
            handle_key_event(&mut app, KeyCode::Char(c));
        }
        handle_key_event(&mut app, KeyCode::Enter);
        assert!(app.notification.is_some());
        assert!(app.message_filter.is_some());
    }
}
