//! Formatting helpers shared across the Orderlens dashboard

use chrono::NaiveDate;

/// Format a monetary amount as Rupiah: two decimal places with
/// comma-grouped thousands, e.g. `Rp 1,234,567.89`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let int_part = cents / 100;
    let frac_part = cents % 100;

    let grouped = group_thousands(&int_part.to_string());
    let sign = if negative { "-" } else { "" };
    format!("{}Rp {}.{:02}", sign, grouped, frac_part)
}

/// Format a calendar date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Insert a comma separator every three digits, right to left
fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}
