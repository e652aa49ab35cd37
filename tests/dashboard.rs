//! End-to-end dashboard tests against a test backend: section layout, table
//! fidelity, chart values and fail-fast bundle loading.

use std::io::Write;

use ratatui::{backend::TestBackend, Terminal};

use demma::bundle::{load_bundle, sample_bundle, BundleError};
use demma::narrative;
use demma::report::Report;
use demma::types::{App, AppMode};
use demma::ui;

const SECTION_ORDER: [&str; 6] = [
    "DEMMA - Digital Media Marketing Agent",
    "Conversion Prediction Model",
    "Spend Optimization",
    "User Segmentation",
    "Recommended Messaging by Segment",
    "Example AI Insights",
];

fn test_app(show_values: bool) -> App {
    let bundle = sample_bundle();
    let report = Report::compute(&bundle);
    App::new(bundle, report, show_values)
}

fn render_to_text(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(|f| ui::draw(f, app)).expect("draw frame");

    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn overview_renders_all_sections_in_fixed_order() {
    let app = test_app(false);
    let text = render_to_text(&app, 150, 64);

    let mut last_index = 0;
    for section in SECTION_ORDER {
        let index = text
            .find(section)
            .unwrap_or_else(|| panic!("section header missing: {}", section));
        assert!(
            index >= last_index,
            "section out of order: {} at {} before {}",
            section,
            index,
            last_index
        );
        last_index = index;
    }
}

#[test]
fn spend_table_has_columns_in_order_and_all_rows() {
    let app = test_app(false);
    let text = render_to_text(&app, 150, 64);

    // The header line carrying "Optimized Spend" is the spend table header;
    // all five columns must appear on it, left to right.
    let header_line = text
        .lines()
        .find(|line| line.contains("Optimized Spend"))
        .expect("spend header line");
    let mut last = 0;
    for column in ["Channel", "Campaign", "Message", "ROAS", "Optimized Spend"] {
        let index = header_line
            .find(column)
            .unwrap_or_else(|| panic!("column missing: {}", column));
        assert!(index >= last, "column out of order: {}", column);
        last = index;
    }

    // Row-for-row: every summary row shows its campaign and formatted spend.
    for row in &app.bundle.summary {
        let line = text.lines().find(|l| {
            l.contains(&row.channel)
                && l.contains(&row.campaign)
                && l.contains(&demma::ui::utils::format_currency(row.optimized_spend))
        });
        assert!(
            line.is_some(),
            "summary row not rendered: {} / {} / {}",
            row.channel,
            row.campaign,
            row.optimized_spend
        );
    }
}

#[test]
fn segment_chart_shows_value_counts() {
    let app = test_app(true);
    let text = render_to_text(&app, 150, 64);

    // Labels for every segment, and (with values enabled) the exact counts.
    for entry in &app.report.segment_counts {
        assert!(
            text.contains(&entry.segment),
            "segment label missing: {}",
            entry.segment
        );
    }
    let counts: Vec<u64> = app.report.segment_counts.iter().map(|c| c.users).collect();
    assert_eq!(counts, vec![14, 11, 9, 6]);
    for count in counts {
        assert!(text.contains(&count.to_string()));
    }
    assert!(text.contains('█'), "histogram bars missing");
}

#[test]
fn insights_are_identical_across_renders() {
    let app = test_app(false);
    let first = render_to_text(&app, 150, 64);
    let second = render_to_text(&app, 150, 64);
    assert_eq!(first, second);

    assert_eq!(narrative::as_markdown(), narrative::as_markdown());
    assert_eq!(narrative::INSIGHT_BULLETS.len(), 11);
}

#[test]
fn focused_views_render_their_own_widgets() {
    let mut app = test_app(false);

    app.mode = AppMode::Model;
    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("F1 Score by Class"));
    assert!(text.contains("precision"));

    app.mode = AppMode::Spend;
    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("(C)hannel"));
    assert!(text.contains("(S)pend v")); // default sort marker

    app.mode = AppMode::Segments;
    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("Segment Counts"));

    app.mode = AppMode::Messaging;
    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("No filter - press '/' to search"));

    app.mode = AppMode::Insights;
    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("Example AI Insights"));
}

#[test]
fn messaging_filter_limits_rendered_rows() {
    let mut app = test_app(false);
    app.mode = AppMode::Messaging;
    app.message_filter = Some(demma::types::MessageFilter::new("Google Ads".to_string()));

    let text = render_to_text(&app, 150, 40);
    assert!(text.contains("Google Ads"));
    assert!(!text.contains("Emotional Appeal + Discount"));
    assert!(text.contains("2 of 6 rows"));
}

#[test]
fn each_missing_table_fails_load_before_any_output() {
    let complete = serde_json::json!({
        "model_eval": { "y_test": ["0", "1"], "y_pred": ["0", "1"] },
        "summary": [
            { "channel": "LinkedIn", "campaign": "Campaign A", "message": "Discount",
              "roas": 2.4, "optimized_spend": 1800.0 }
        ],
        "user_data": [ { "segment": 0 } ],
        "message_perf": [
            { "segment": 0, "channel": "LinkedIn", "message": "Discount",
              "ctr": 0.03, "conversion_rate": 0.01, "roas": 2.4 }
        ]
    });

    // The complete bundle loads.
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{}", complete).expect("write bundle");
    assert!(load_bundle(file.path()).is_ok());

    // Dropping any one of the four tables fails before anything renders.
    for table in ["model_eval", "summary", "user_data", "message_perf"] {
        let mut corrupt = complete.clone();
        corrupt.as_object_mut().unwrap().remove(table);
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", corrupt).expect("write bundle");
        let err = load_bundle(file.path()).expect_err(table);
        assert!(
            matches!(err, BundleError::Json(_)),
            "expected deserialization failure for missing {}",
            table
        );
    }

    // Corrupting a table (emptying it) is caught by validation.
    let mut corrupt = complete.clone();
    corrupt["user_data"] = serde_json::json!([]);
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{}", corrupt).expect("write bundle");
    assert!(matches!(
        load_bundle(file.path()),
        Err(BundleError::Validation(_))
    ));
}

#[test]
fn json_export_covers_every_section() {
    let bundle = sample_bundle();
    let report = Report::compute(&bundle);
    let export = demma::report::ReportExport::new(&bundle, &report);
    let value = serde_json::to_value(&export).expect("serialize export");

    let object = value.as_object().expect("object export");
    for key in [
        "accuracy",
        "classes",
        "classification_report",
        "channel_spend",
        "segment_counts",
        "summary",
        "message_perf",
        "insights",
        "insights_markdown",
    ] {
        assert!(object.contains_key(key), "export missing key: {}", key);
    }
    assert_eq!(
        object["summary"].as_array().unwrap().len(),
        bundle.summary.len()
    );
    assert_eq!(object["insights"].as_array().unwrap().len(), 11);
    let markdown = object["insights_markdown"].as_str().unwrap();
    assert_eq!(markdown.lines().count(), 11);
    assert!(markdown.lines().all(|l| l.starts_with("- ")));
    assert!(object["classification_report"]
        .as_str()
        .unwrap()
        .contains("weighted avg"));
}
