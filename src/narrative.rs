//! Hand-authored narrative insights shown in the report's last section.
//!
//! This block is static by design: it is never derived from the spend or
//! messaging tables and renders identically on every pass.

pub const INSIGHTS_TITLE: &str = "Example AI Insights";

pub const INSIGHT_BULLETS: &[&str] = &[
    "Segment 2 responds best to Emotional Appeal + Discount on LinkedIn Video campaigns.",
    "Segment 1 prefers Free Trials and clicks most on Google Ads.",
    "User 102 has a 68% chance to convert on Facebook Campaign B.",
    "Segment 3 has high interest score but low conversion, needs better targeting.",
    "Emotional Appeal drives highest ROAS on video campaigns (avg 18.9).",
    "Recommend reallocating 30% more budget to Campaign A on LinkedIn with video.",
    "Users aged 25-34 show 2x higher CTR on video.",
    "Rural segments underperform on LinkedIn but excel on Facebook.",
    "Segment 0 users convert well on static campaigns but fall off with video.",
    "Discount messages perform better in suburban areas with ROAS > 2.0.",
    "Campaign B underperforms across all channels, recommend A/B test.",
];

/// The insights joined as a markdown bullet list, used by the JSON export.
pub fn as_markdown() -> String {
    let mut out = String::new();
    for bullet in INSIGHT_BULLETS {
        out.push_str("- ");
        out.push_str(bullet);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_is_stable_across_calls() {
        assert_eq!(as_markdown(), as_markdown());
        assert_eq!(as_markdown().lines().count(), INSIGHT_BULLETS.len());
        assert!(as_markdown().lines().all(|l| l.starts_with("- ")));
    }
}
