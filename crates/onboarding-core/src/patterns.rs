//! Regex patterns and text checks shared by the field rules

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// International phone number, e.g. +1-123-456-7890
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+\d{1,3}-\d{3}-\d{3}-\d{4}$").unwrap();

    /// Email address: dotted local part, at least one subdomain, alphabetic TLD
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[A-Za-z0-9_'+\-]+(?:\.[A-Za-z0-9_'+\-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$"
    )
    .unwrap();
}

/// Example shown next to phone inputs and in phone format errors
pub const PHONE_EXAMPLE: &str = "+1-123-456-7890";

pub fn is_valid_phone(text: &str) -> bool {
    PHONE_PATTERN.is_match(text)
}

pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text)
}

/// True for empty or whitespace-only text
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters rather than bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Amount with thousands separators, e.g. `30000.0` -> `30,000`.
/// Fractions are kept to two places when present (`49.5` -> `49.50`).
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let whole = amount.trunc() as u64;
    let cents = ((amount - amount.trunc()) * 100.0).round() as u64;
    let (whole, cents) = if cents == 100 { (whole + 1, 0) } else { (whole, cents) };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}
