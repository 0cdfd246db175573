use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const RUPEE: &str = "₹";

/// Format an amount as Indian rupees with lakh/crore digit grouping,
/// e.g. `₹1,00,000.00`. Non-finite input renders as zero.
pub fn format_inr(amount: f64, fraction_digits: usize) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.*}", fraction_digits, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(RUPEE);
    out.push_str(&group_indian(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Two decimals, as on the resource views.
pub fn format_currency(amount: f64) -> String {
    format_inr(amount, 2)
}

/// No decimals, as on the dashboard cards.
pub fn format_currency_whole(amount: f64) -> String {
    format_inr(amount, 0)
}

/// Last three digits, then groups of two: 12345678 -> 1,23,45,678.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
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

/// `15 Jan 2025`; `-` when there is no date.
pub fn format_date_short(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%-d %b %Y").to_string(),
        None => "-".to_string(),
    }
}

/// `January 15, 2025`; empty when there is no date.
pub fn format_date_long(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `+12.7%` / `-2.1%`.
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}%")
}

/// Icon shown next to an item, picked from its free-text category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Home,
    Car,
    Building,
    Wallet,
    Gem,
    Coins,
    CreditCard,
    GraduationCap,
    DollarSign,
    Shield,
    Heart,
    AlertTriangle,
    FileText,
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

pub fn asset_icon(asset_type: &str) -> Icon {
    let t = asset_type.to_lowercase();
    if matches_any(&t, &["real estate", "property", "residence"]) {
        Icon::Home
    } else if matches_any(&t, &["vehicle", "car"]) {
        Icon::Car
    } else if matches_any(&t, &["retirement", "401"]) {
        Icon::Building
    } else if matches_any(&t, &["cash", "savings"]) {
        Icon::Wallet
    } else if matches_any(&t, &["jewelry", "personal"]) {
        Icon::Gem
    } else {
        Icon::Coins
    }
}

pub fn liability_icon(liability_type: &str) -> Icon {
    let t = liability_type.to_lowercase();
    if matches_any(&t, &["mortgage", "home"]) {
        Icon::Home
    } else if matches_any(&t, &["car", "auto", "vehicle"]) {
        Icon::Car
    } else if matches_any(&t, &["credit", "card"]) {
        Icon::CreditCard
    } else if matches_any(&t, &["student", "education"]) {
        Icon::GraduationCap
    } else {
        Icon::DollarSign
    }
}

pub fn insurance_icon(insurance_type: &str) -> Icon {
    let t = insurance_type.to_lowercase();
    if matches_any(&t, &["term", "life"]) {
        Icon::Shield
    } else if t.contains("health") {
        Icon::Heart
    } else if matches_any(&t, &["auto", "car", "vehicle"]) {
        Icon::Car
    } else if t.contains("home") {
        Icon::Home
    } else if t.contains("disability") {
        Icon::AlertTriangle
    } else {
        Icon::FileText
    }
}
