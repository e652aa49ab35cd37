use serde::Serialize;
use std::collections::HashMap;

use crate::narrative;
use crate::types::{MessageRow, ModelEval, ReportBundle, SpendRow, UserRecord};

/// Per-class evaluation metrics for the conversion model.
#[derive(Debug, Clone, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Total optimized spend for one channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSpend {
    pub channel: String,
    pub optimized_spend: f64,
}

/// Number of users carrying one segment label.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentCount {
    pub segment: String,
    pub users: u64,
}

/// Everything derived from the bundle at startup. The bundle itself stays
/// untouched; these are the display-ready aggregates.
pub struct Report {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub total_support: usize,
    pub classification_text: String,
    pub channel_spend: Vec<ChannelSpend>,
    pub segment_counts: Vec<SegmentCount>,
}

impl Report {
    pub fn compute(bundle: &ReportBundle) -> Report {
        let classes = class_metrics(&bundle.model_eval);
        let total_support = bundle.model_eval.y_test.len();
        let accuracy = accuracy(&bundle.model_eval);
        let macro_avg = average_metrics("macro avg", &classes, total_support, false);
        let weighted_avg = average_metrics("weighted avg", &classes, total_support, true);
        let classification_text =
            classification_text(&classes, accuracy, &macro_avg, &weighted_avg, total_support);

        Report {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
            total_support,
            classification_text,
            channel_spend: channel_spend(&bundle.summary),
            segment_counts: segment_counts(&bundle.user_data),
        }
    }
}

/// Per-class precision, recall, F1 and support over the union of labels seen
/// in ground truth and predictions, sorted by label. Undefined ratios
/// (a label never predicted, or never true) come out as 0.0.
fn class_metrics(eval: &ModelEval) -> Vec<ClassMetrics> {
    let mut labels: Vec<&String> = eval.y_test.iter().chain(eval.y_pred.iter()).collect();
    labels.sort();
    labels.dedup();

    labels
        .into_iter()
        .map(|label| {
            let true_positives = eval
                .y_test
                .iter()
                .zip(eval.y_pred.iter())
                .filter(|(t, p)| *t == label && *p == label)
                .count();
            let predicted = eval.y_pred.iter().filter(|p| *p == label).count();
            let actual = eval.y_test.iter().filter(|t| *t == label).count();

            let precision = ratio(true_positives, predicted);
            let recall = ratio(true_positives, actual);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            ClassMetrics {
                label: label.clone(),
                precision,
                recall,
                f1,
                support: actual,
            }
        })
        .collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn accuracy(eval: &ModelEval) -> f64 {
    let matches = eval
        .y_test
        .iter()
        .zip(eval.y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    ratio(matches, eval.y_test.len())
}

fn average_metrics(
    label: &str,
    classes: &[ClassMetrics],
    total_support: usize,
    weighted: bool,
) -> ClassMetrics {
    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut f1 = 0.0;
    for class in classes {
        let weight = if weighted {
            ratio(class.support, total_support)
        } else {
            1.0 / classes.len().max(1) as f64
        };
        precision += class.precision * weight;
        recall += class.recall * weight;
        f1 += class.f1 * weight;
    }
    ClassMetrics {
        label: label.to_string(),
        precision,
        recall,
        f1,
        support: total_support,
    }
}

/// Render the metrics in the layout the upstream tooling prints: a header
/// row, one row per class, then accuracy and the macro/weighted averages.
fn classification_text(
    classes: &[ClassMetrics],
    accuracy: f64,
    macro_avg: &ClassMetrics,
    weighted_avg: &ClassMetrics,
    total_support: usize,
) -> String {
    let label_width = classes
        .iter()
        .map(|c| c.label.len())
        .max()
        .unwrap_or(0)
        .max("weighted avg".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:>width$}  {:>9} {:>9} {:>9} {:>9}\n\n",
        "",
        "precision",
        "recall",
        "f1-score",
        "support",
        width = label_width
    ));

    let metric_row = |label: &str, m: &ClassMetrics| {
        format!(
            "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}\n",
            label,
            m.precision,
            m.recall,
            m.f1,
            m.support,
            width = label_width
        )
    };

    for class in classes {
        out.push_str(&metric_row(&class.label, class));
    }
    out.push('\n');
    out.push_str(&format!(
        "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}\n",
        "accuracy",
        "",
        "",
        accuracy,
        total_support,
        width = label_width
    ));
    out.push_str(&metric_row(&macro_avg.label, macro_avg));
    out.push_str(&metric_row(&weighted_avg.label, weighted_avg));
    out
}

/// Sum of optimized spend grouped by channel, descending spend then label.
fn channel_spend(summary: &[SpendRow]) -> Vec<ChannelSpend> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for row in summary {
        *totals.entry(row.channel.as_str()).or_insert(0.0) += row.optimized_spend;
    }
    let mut channels: Vec<ChannelSpend> = totals
        .into_iter()
        .map(|(channel, optimized_spend)| ChannelSpend {
            channel: channel.to_string(),
            optimized_spend,
        })
        .collect();
    channels.sort_by(|a, b| {
        b.optimized_spend
            .partial_cmp(&a.optimized_spend)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.channel.cmp(&b.channel))
    });
    channels
}

/// Value counts of the segment column, descending count then label.
fn segment_counts(user_data: &[UserRecord]) -> Vec<SegmentCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for user in user_data {
        *counts.entry(user.segment.as_str()).or_insert(0) += 1;
    }
    let mut segments: Vec<SegmentCount> = counts
        .into_iter()
        .map(|(segment, users)| SegmentCount {
            segment: segment.to_string(),
            users,
        })
        .collect();
    segments.sort_by(|a, b| b.users.cmp(&a.users).then_with(|| a.segment.cmp(&b.segment)));
    segments
}

/// JSON shape for `--json` one-shot output.
#[derive(Serialize)]
pub struct ReportExport<'a> {
    pub generated_at: Option<String>,
    pub accuracy: f64,
    pub classes: &'a [ClassMetrics],
    pub classification_report: &'a str,
    pub channel_spend: &'a [ChannelSpend],
    pub segment_counts: &'a [SegmentCount],
    pub summary: &'a [SpendRow],
    pub message_perf: &'a [MessageRow],
    pub insights: &'static [&'static str],
    pub insights_markdown: String,
}

impl<'a> ReportExport<'a> {
    pub fn new(bundle: &'a ReportBundle, report: &'a Report) -> Self {
        ReportExport {
            generated_at: bundle.generated_at.map(|t| t.to_rfc3339()),
            accuracy: report.accuracy,
            classes: &report.classes,
            classification_report: &report.classification_text,
            channel_spend: &report.channel_spend,
            segment_counts: &report.segment_counts,
            summary: &bundle.summary,
            message_perf: &bundle.message_perf,
            insights: narrative::INSIGHT_BULLETS,
            insights_markdown: narrative::as_markdown(),
        }
    }
}
