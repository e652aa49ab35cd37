use std::io;
use std::path::Path;
use std::process::exit;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};

use demma::bundle::{load_bundle, sample_bundle};
use demma::config::{load_config, reset_config, save_config, Cli, SavedConfig};
use demma::report::{Report, ReportExport};
use demma::types::{App, AppMode, ReportBundle};
use demma::ui;

fn display_startup_info(source: &str, is_json: bool) {
    eprintln!("🚀 Starting demma...");
    eprintln!("📦 Report bundle: {}", source);
    eprintln!(
        "📊 Mode: {}",
        if is_json { "JSON output" } else { "Interactive TUI" }
    );
    if !is_json {
        eprintln!("⏱️  Preparing the dashboard... (Press 'q' to quit)");
        eprintln!();
        eprintln!("🎯 Tip: Press '1'-'5' to zoom into a section, '0' for the overview, Tab to cycle");
        eprintln!("🔎 In the messaging view, press '/' to filter rows by regex");
        eprintln!();
    }
}

fn show_usage_help() {
    eprintln!("❌ No report bundle specified!");
    eprintln!();
    eprintln!("💡 Usage examples:");
    eprintln!("   demma --input report.json            # Render a pipeline-produced bundle");
    eprintln!("   demma --input report.json --json     # Dump the computed report as JSON");
    eprintln!("   demma --sample                       # Render the built-in sample report");
    eprintln!("   demma --reset                        # Reset saved display preferences");
    eprintln!();
    eprintln!("📄 Bundle schema (JSON object):");
    eprintln!("   model_eval:   {{ y_test: [label], y_pred: [label] }}");
    eprintln!("   summary:      [{{ channel, campaign, message, roas, optimized_spend }}]");
    eprintln!("   user_data:    [{{ segment, ... }}]");
    eprintln!("   message_perf: [{{ segment, channel, message, ctr, conversion_rate, roas }}]");
    eprintln!("   generated_at: optional RFC 3339 timestamp");
    eprintln!();
    eprintln!("📖 Use --help for more options");
}

/// Resolve the bundle before any terminal setup so a broken input fails fast
/// on stderr and never leaves a partial render behind.
fn resolve_bundle(cli: &Cli) -> Option<(ReportBundle, String)> {
    if cli.sample {
        return Some((sample_bundle(), "built-in sample".to_string()));
    }
    let path: &Path = cli.input.as_deref()?;
    match load_bundle(path) {
        Ok(bundle) => Some((bundle, path.display().to_string())),
        Err(e) => {
            eprintln!("❌ {}", e);
            exit(1);
        }
    }
}

fn main() -> Result<(), io::Error> {
    let cli = Cli::parse();

    // Handle reset flag first
    if cli.reset {
        match reset_config() {
            Ok(true) => {
                println!("✅ Saved preferences have been reset.");
            }
            Ok(false) => {
                println!("ℹ️  No saved preferences found to reset.");
            }
            Err(e) => {
                eprintln!("❌ Error resetting preferences: {}", e);
                exit(1);
            }
        }
        return Ok(());
    }

    let Some((bundle, source)) = resolve_bundle(&cli) else {
        show_usage_help();
        exit(1);
    };
    let report = Report::compute(&bundle);

    if cli.json {
        display_startup_info(&source, true);
        let export = ReportExport::new(&bundle, &report);
        if let Ok(json_output) = serde_json::to_string_pretty(&export) {
            println!("{}", json_output);
        }
        return Ok(());
    }

    display_startup_info(&source, false);

    // Small delay to let user read the information
    std::thread::sleep(Duration::from_millis(1500));

    let saved = load_config();
    let show_values = cli.values || saved.as_ref().map(|c| c.show_values).unwrap_or(false);
    let mut app = App::new(bundle, report, show_values);
    if let Some(mode) = saved
        .as_ref()
        .and_then(|c| c.start_view.as_deref())
        .and_then(AppMode::from_config_name)
    {
        app.mode = mode;
    }
    let mut terminal = ui::setup_terminal()?;

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // --- Draw UI ---
        ui::render_ui(&app, &mut terminal)?;

        // --- Input Handling ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == crossterm::event::KeyEventKind::Press {
                    if ui::input::handle_key_event(&mut app, key_event.code) {
                        break; // Exit condition
                    }
                }
            }
        }

        // --- Tick-based updates ---
        if last_tick.elapsed() >= tick_rate {
            // Expire notifications after 5 seconds
            if let Some(time) = app.notification_time {
                if time.elapsed() > Duration::from_secs(5) {
                    app.notification = None;
                    app.notification_time = None;
                }
            }
            last_tick = Instant::now();
        }
    }

    ui::restore_terminal(&mut terminal)?;

    // Persist display preferences for the next run, best effort.
    let _ = save_config(&SavedConfig {
        show_values: app.show_values,
        start_view: Some(app.mode.config_name().to_string()),
    });

    Ok(())
}
