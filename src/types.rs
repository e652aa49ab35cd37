use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

use crate::report::Report;

/// Accept labels either as JSON strings or as bare numbers. Upstream exports
/// segment ids and class labels as integers, older bundles as strings.
pub fn label_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

fn labels_from_json<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "label_from_json")] String);

    let raw = Vec::<Wrapper>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|w| w.0).collect())
}

/// Ground-truth and predicted conversion labels from the upstream model run.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEval {
    #[serde(deserialize_with = "labels_from_json")]
    pub y_test: Vec<String>,
    #[serde(deserialize_with = "labels_from_json")]
    pub y_pred: Vec<String>,
}

/// One row of the spend-optimization summary table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpendRow {
    pub channel: String,
    pub campaign: String,
    pub message: String,
    pub roas: f64,
    pub optimized_spend: f64,
}

/// One user row. Only the segment label is displayed; the remaining per-user
/// columns ride along untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(deserialize_with = "label_from_json")]
    pub segment: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One row of per-message performance metrics.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageRow {
    #[serde(deserialize_with = "label_from_json")]
    pub segment: String,
    pub channel: String,
    pub message: String,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub roas: f64,
}

/// The precomputed artifacts a report is rendered from. Loaded once at
/// startup and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportBundle {
    pub model_eval: ModelEval,
    pub summary: Vec<SpendRow>,
    pub user_data: Vec<UserRecord>,
    pub message_perf: Vec<MessageRow>,
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Overview,
    Model,
    Spend,
    Segments,
    Messaging,
    Insights,
    EditingFilter,
}

impl AppMode {
    /// Name stored in saved preferences. Filter editing is transient and
    /// saves as the messaging view.
    pub fn config_name(self) -> &'static str {
        match self {
            AppMode::Overview => "overview",
            AppMode::Model => "model",
            AppMode::Spend => "spend",
            AppMode::Segments => "segments",
            AppMode::Messaging | AppMode::EditingFilter => "messaging",
            AppMode::Insights => "insights",
        }
    }

    pub fn from_config_name(name: &str) -> Option<AppMode> {
        match name {
            "overview" => Some(AppMode::Overview),
            "model" => Some(AppMode::Model),
            "spend" => Some(AppMode::Spend),
            "segments" => Some(AppMode::Segments),
            "messaging" => Some(AppMode::Messaging),
            "insights" => Some(AppMode::Insights),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Channel,
    Campaign,
    Roas,
    OptimizedSpend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Free-text filter over the messaging table. A compiled regex when the
/// pattern is valid, otherwise case-insensitive substring matching on `term`.
pub struct MessageFilter {
    pub term: String,
    pub search_regex: Option<Regex>,
}

impl MessageFilter {
    pub fn new(term: String) -> Self {
        let search_regex = Regex::new(&term).ok();
        MessageFilter { term, search_regex }
    }

    pub fn matches(&self, row: &MessageRow) -> bool {
        let haystack = format!("{} {} {}", row.segment, row.channel, row.message);
        if let Some(re) = &self.search_regex {
            re.is_match(&haystack)
        } else {
            haystack.to_lowercase().contains(&self.term.to_lowercase())
        }
    }
}

pub struct App {
    pub bundle: ReportBundle,
    pub report: Report,
    pub mode: AppMode,
    pub sort_by: SortColumn,
    pub sort_direction: SortDirection,
    pub show_values: bool,
    pub model_scroll: usize,
    pub spend_scroll: usize,
    pub message_scroll: usize,
    pub message_filter: Option<MessageFilter>,
    pub filter_input: String,
    pub notification: Option<String>,
    pub notification_time: Option<Instant>,
}

impl App {
    pub fn new(bundle: ReportBundle, report: Report, show_values: bool) -> Self {
        App {
            bundle,
            report,
            mode: AppMode::Overview,
            sort_by: SortColumn::OptimizedSpend,
            sort_direction: SortDirection::Desc,
            show_values,
            model_scroll: 0,
            spend_scroll: 0,
            message_scroll: 0,
            message_filter: None,
            filter_input: String::new(),
            notification: None,
            notification_time: None,
        }
    }

    /// Spend rows in the currently selected sort order.
    pub fn sorted_spend(&self) -> Vec<&SpendRow> {
        let mut rows: Vec<&SpendRow> = self.bundle.summary.iter().collect();
        match self.sort_by {
            SortColumn::Channel => rows.sort_by(|a, b| a.channel.cmp(&b.channel)),
            SortColumn::Campaign => rows.sort_by(|a, b| a.campaign.cmp(&b.campaign)),
            SortColumn::Roas => rows.sort_by(|a, b| {
                a.roas.partial_cmp(&b.roas).unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortColumn::OptimizedSpend => rows.sort_by(|a, b| {
                a.optimized_spend
                    .partial_cmp(&b.optimized_spend)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        if self.sort_direction == SortDirection::Desc {
            rows.reverse();
        }
        rows
    }

    /// Messaging rows with the active filter applied.
    pub fn filtered_messages(&self) -> Vec<&MessageRow> {
        self.bundle
            .message_perf
            .iter()
            .filter(|row| match &self.message_filter {
                Some(filter) => filter.matches(row),
                None => true,
            })
            .collect()
    }

    /// Select a sort column, flipping direction when it is already active.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        if self.sort_by == column {
            self.sort_direction = match self.sort_direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.sort_by = column;
            self.sort_direction = SortDirection::Desc;
        }
        self.spend_scroll = 0;
    }

    pub fn notify(&mut self, message: String) {
        self.notification = Some(message);
        self.notification_time = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::sample_bundle;
    use crate::report::Report;

    fn test_app() -> App {
        let bundle = sample_bundle();
        let report = Report::compute(&bundle);
        App::new(bundle, report, true)
    }

    #[test]
    fn toggle_sort_flips_direction_on_repeat() {
        let mut app = test_app();
        app.toggle_sort(SortColumn::Roas);
        assert_eq!(app.sort_by, SortColumn::Roas);
        assert_eq!(app.sort_direction, SortDirection::Desc);
        app.toggle_sort(SortColumn::Roas);
        assert_eq!(app.sort_direction, SortDirection::Asc);
        app.toggle_sort(SortColumn::Channel);
        assert_eq!(app.sort_by, SortColumn::Channel);
        assert_eq!(app.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn sorted_spend_orders_by_selected_column() {
        let mut app = test_app();
        app.toggle_sort(SortColumn::Roas);
        let rows = app.sorted_spend();
        for pair in rows.windows(2) {
            assert!(pair[0].roas >= pair[1].roas);
        }
    }

    #[test]
    fn invalid_regex_falls_back_to_substring() {
        let filter = MessageFilter::new("free trial(".to_string());
        assert!(filter.search_regex.is_none());
        let row = MessageRow {
            segment: "1".to_string(),
            channel: "Google Ads".to_string(),
            message: "Free Trial(".to_string(),
            ctr: 0.1,
            conversion_rate: 0.05,
            roas: 1.5,
        };
        assert!(filter.matches(&row));
    }

    #[test]
    fn label_deserializer_accepts_numbers_and_strings() {
        let record: UserRecord = serde_json::from_str(r#"{"segment": 2, "age": 31}"#).unwrap();
        assert_eq!(record.segment, "2");
        let record: UserRecord = serde_json::from_str(r#"{"segment": "rural"}"#).unwrap();
        assert_eq!(record.segment, "rural");
    }
}
