use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::types::{MessageRow, ModelEval, ReportBundle, SpendRow, UserRecord};

#[derive(Debug)]
pub enum BundleError {
    Io(io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl From<io::Error> for BundleError {
    fn from(error: io::Error) -> Self {
        BundleError::Io(error)
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(error: serde_json::Error) -> Self {
        BundleError::Json(error)
    }
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::Io(e) => write!(f, "cannot read bundle: {}", e),
            BundleError::Json(e) => write!(f, "bundle is not valid JSON: {}", e),
            BundleError::Validation(msg) => write!(f, "bundle failed validation: {}", msg),
        }
    }
}

/// Read and validate a report bundle. Any failure here happens before the
/// terminal is touched, so a broken bundle never produces a partial render.
pub fn load_bundle(path: &Path) -> Result<ReportBundle, BundleError> {
    let raw = fs::read_to_string(path)?;
    let bundle: ReportBundle = serde_json::from_str(&raw)?;
    validate(&bundle)?;
    Ok(bundle)
}

/// Shape checks beyond what deserialization enforces.
pub fn validate(bundle: &ReportBundle) -> Result<(), BundleError> {
    let eval = &bundle.model_eval;
    if eval.y_test.is_empty() {
        return Err(BundleError::Validation(
            "model_eval.y_test is empty".to_string(),
        ));
    }
    if eval.y_test.len() != eval.y_pred.len() {
        return Err(BundleError::Validation(format!(
            "model_eval label arrays differ in length: y_test has {}, y_pred has {}",
            eval.y_test.len(),
            eval.y_pred.len()
        )));
    }
    if bundle.summary.is_empty() {
        return Err(BundleError::Validation("summary has no rows".to_string()));
    }
    if bundle.user_data.is_empty() {
        return Err(BundleError::Validation("user_data has no rows".to_string()));
    }
    if bundle.message_perf.is_empty() {
        return Err(BundleError::Validation(
            "message_perf has no rows".to_string(),
        ));
    }
    Ok(())
}

fn spend_row(
    channel: &str,
    campaign: &str,
    message: &str,
    roas: f64,
    optimized_spend: f64,
) -> SpendRow {
    SpendRow {
        channel: channel.to_string(),
        campaign: campaign.to_string(),
        message: message.to_string(),
        roas,
        optimized_spend,
    }
}

fn message_row(
    segment: &str,
    channel: &str,
    message: &str,
    ctr: f64,
    conversion_rate: f64,
    roas: f64,
) -> MessageRow {
    MessageRow {
        segment: segment.to_string(),
        channel: channel.to_string(),
        message: message.to_string(),
        ctr,
        conversion_rate,
        roas,
    }
}

/// Built-in demo bundle for `--sample` runs and tests. Deterministic so
/// rendered output is stable.
pub fn sample_bundle() -> ReportBundle {
    // 40 held-out users; the model gets 31 of them right.
    let y_test: Vec<String> = "0001011010 0110010010 1101001001 0010110100"
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_string())
        .collect();
    let mut y_pred = y_test.clone();
    for idx in [3, 7, 12, 18, 21, 26, 30, 33, 38] {
        let flipped = if y_pred[idx] == "0" { "1" } else { "0" };
        y_pred[idx] = flipped.to_string();
    }

    let summary = vec![
        spend_row("LinkedIn", "Campaign A", "Emotional Appeal", 18.9, 5200.0),
        spend_row("LinkedIn", "Campaign A", "Discount", 2.4, 1800.0),
        spend_row("LinkedIn", "Campaign B", "Free Trial", 0.9, 400.0),
        spend_row("Google Ads", "Campaign A", "Free Trial", 3.1, 2600.0),
        spend_row("Google Ads", "Campaign B", "Discount", 1.2, 700.0),
        spend_row("Google Ads", "Campaign A", "Emotional Appeal", 2.2, 1500.0),
        spend_row("Facebook", "Campaign B", "Emotional Appeal", 1.6, 900.0),
        spend_row("Facebook", "Campaign A", "Discount", 2.1, 1400.0),
        spend_row("Facebook", "Campaign B", "Free Trial", 1.0, 500.0),
    ];

    let segments: &[(&str, usize, &str)] = &[
        ("0", 14, "urban"),
        ("1", 11, "suburban"),
        ("2", 9, "urban"),
        ("3", 6, "rural"),
    ];
    let mut user_data = Vec::new();
    let mut user_id = 100;
    for (segment, count, region) in segments {
        for offset in 0..*count {
            let mut extra = serde_json::Map::new();
            extra.insert("user_id".to_string(), serde_json::json!(user_id));
            extra.insert("age".to_string(), serde_json::json!(22 + (offset * 3) % 40));
            extra.insert("region".to_string(), serde_json::json!(region));
            user_data.push(UserRecord {
                segment: segment.to_string(),
                extra,
            });
            user_id += 1;
        }
    }

    let message_perf = vec![
        message_row("0", "Facebook", "Discount", 0.031, 0.012, 1.4),
        message_row("1", "Google Ads", "Free Trial", 0.058, 0.024, 3.1),
        message_row("2", "LinkedIn", "Emotional Appeal + Discount", 0.072, 0.031, 18.9),
        message_row("3", "Facebook", "Emotional Appeal", 0.044, 0.008, 0.7),
        message_row("1", "LinkedIn", "Discount", 0.027, 0.011, 2.0),
        message_row("2", "Google Ads", "Free Trial", 0.036, 0.015, 2.6),
    ];

    let generated_at: Option<DateTime<Utc>> = "2025-06-14T09:30:00Z".parse().ok();

    ReportBundle {
        model_eval: ModelEval { y_test, y_pred },
        summary,
        user_data,
        message_perf,
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_bundle_passes_validation() {
        let bundle = sample_bundle();
        assert!(validate(&bundle).is_ok());
        assert_eq!(bundle.model_eval.y_test.len(), 40);
        assert_eq!(bundle.model_eval.y_pred.len(), 40);
        assert_eq!(bundle.user_data.len(), 40);
    }

    #[test]
    fn missing_table_is_a_deserialization_error() {
        let raw = r#"{
            "model_eval": { "y_test": ["0"], "y_pred": ["0"] },
            "summary": [],
            "user_data": [{ "segment": 0 }]
        }"#;
        let parsed: Result<ReportBundle, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }

    #[test]
    fn mismatched_label_arrays_fail_validation() {
        let mut bundle = sample_bundle();
        bundle.model_eval.y_pred.pop();
        let err = validate(&bundle).unwrap_err();
        match err {
            BundleError::Validation(msg) => assert!(msg.contains("y_pred")),
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn empty_user_data_fails_validation() {
        let mut bundle = sample_bundle();
        bundle.user_data.clear();
        assert!(matches!(
            validate(&bundle),
            Err(BundleError::Validation(_))
        ));
    }
}
