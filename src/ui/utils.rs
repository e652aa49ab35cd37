/// Format a spend amount as dollars with thousands separators. Whole-dollar
/// amounts drop the cents.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = (cents % 100).abs();

    let mut digits = whole.abs().to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        grouped = format!(",{}{}", &digits[split..], grouped);
        digits.truncate(split);
    }
    grouped = format!("{}{}", digits, grouped);

    let sign = if whole < 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, frac)
    }
}

/// Format a ROAS multiple, e.g. 18.9x.
pub fn format_roas(roas: f64) -> String {
    format!("{:.1}x", roas)
}

/// Format a 0..1 rate as a percentage, e.g. 0.031 -> 3.1%.
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Truncate a label for narrow chart columns.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() > max {
        let cut: String = label.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(900.0), "$900");
        assert_eq!(format_currency(5200.0), "$5,200");
        assert_eq!(format_currency(1400000.0), "$1,400,000");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-1800.25), "-$1,800.25");
    }

    #[test]
    fn percent_and_roas_formatting() {
        assert_eq!(format_percent(0.031), "3.1%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_roas(18.9), "18.9x");
    }

    #[test]
    fn labels_truncate_with_ellipsis() {
        assert_eq!(truncate_label("LinkedIn", 12), "LinkedIn");
        assert_eq!(truncate_label("Emotional Appeal + Discount", 12), "Emotional...");
    }
}
