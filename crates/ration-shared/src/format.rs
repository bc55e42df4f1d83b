//! Display helpers for prices and timestamps.

use chrono::{DateTime, Utc};

use crate::constants::CURRENCY_SYMBOL;

/// Format an amount in rupees with Indian digit grouping and two decimals,
/// e.g. `123456.5` becomes `₹1,23,456.50`.
pub fn format_currency(amount: f64) -> String {
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };

    format!(
        "{sign}{CURRENCY_SYMBOL}{}.{fraction:02}",
        group_indian(rupees)
    )
}

/// `Mar 05, 2026`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}

/// `Mar 05, 2026 14:30`
pub fn format_date_time(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y %H:%M").to_string()
}

// Last three digits form one group, every group before that has two.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
