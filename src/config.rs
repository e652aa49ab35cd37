use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "demma", about = "Terminal dashboard for digital-media marketing analytics reports")]
pub struct Cli {
    /// Path to a report bundle (JSON) produced by the analytics pipeline
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Render the built-in sample report
    #[arg(long)]
    pub sample: bool,
    /// Print the computed report as JSON and exit
    #[arg(long)]
    pub json: bool,
    /// Show numeric values on chart bars
    #[arg(long)]
    pub values: bool,
    /// Reset saved display preferences
    #[arg(long)]
    pub reset: bool,
}

/// Display preferences persisted between runs.
#[derive(Serialize, Deserialize, Default)]
pub struct SavedConfig {
    pub show_values: bool,
    /// View to open on startup, named per `AppMode::config_name`.
    pub start_view: Option<String>,
}

fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("demma").join("config.json"))
}

/// Load saved preferences. Best effort: a missing or corrupt file just means
/// defaults.
pub fn load_config() -> Option<SavedConfig> {
    let path = config_file()?;
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_config(config: &SavedConfig) -> Result<(), io::Error> {
    let Some(path) = config_file() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, raw)
}

/// Delete the saved preferences file. Returns whether one existed.
pub fn reset_config() -> Result<bool, io::Error> {
    let Some(path) = config_file() else {
        return Ok(false);
    };
    if path.exists() {
        fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppMode;

    #[test]
    fn saved_config_round_trips_through_json() {
        let config = SavedConfig {
            show_values: true,
            start_view: Some(AppMode::Segments.config_name().to_string()),
        };
        let raw = serde_json::to_string(&config).unwrap();
        let restored: SavedConfig = serde_json::from_str(&raw).unwrap();
        assert!(restored.show_values);
        let mode = restored
            .start_view
            .as_deref()
            .and_then(AppMode::from_config_name);
        assert_eq!(mode, Some(AppMode::Segments));
    }

    #[test]
    fn every_view_name_maps_back_to_its_mode() {
        for mode in [
            AppMode::Overview,
            AppMode::Model,
            AppMode::Spend,
            AppMode::Segments,
            AppMode::Messaging,
            AppMode::Insights,
        ] {
            assert_eq!(AppMode::from_config_name(mode.config_name()), Some(mode));
        }
        // Filter editing never persists as its own view.
        assert_eq!(AppMode::EditingFilter.config_name(), "messaging");
        assert_eq!(AppMode::from_config_name("bogus"), None);
    }
}
