//! Brazilian-real formatting for costs.
//!
//! Display text uses `.` for thousands and `,` for decimals (`1.500,00`).
//! Typed input is treated as a count of cents, so typing `1`, `5`, `0`
//! renders `1,50`.

use crate::error::FormError;
use crate::model::Cost;

/// Longest run of digits the cost mask accepts.
pub const MAX_COST_DIGITS: usize = 15;

const CURRENCY_SYMBOL: &str = "R$";

pub fn format_cents(cents: u64) -> String {
    format!("{},{:02}", group_thousands(cents / 100), cents % 100)
}

/// List/detail rendering, symbol included.
pub fn format_brl(cost: Cost) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_cents(cost.cents()))
}

/// Re-renders whatever the user typed as cents. Non-digits are dropped; an
/// input with no digits stays empty so the field still reads as missing.
pub fn mask_cost_input(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_COST_DIGITS)
        .collect();

    match digits.parse::<u64>() {
        Ok(cents) => format_cents(cents),
        Err(_) => String::new(),
    }
}

/// Turns display text back into the canonical value.
///
/// Every `.` is a thousands separator and `,` is the decimal mark, so
/// `"1.200,50"` is 1200.50. An optional `R$` prefix is tolerated.
pub fn parse_cost(text: &str) -> Result<Cost, FormError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed).trim();

    if trimmed.is_empty() {
        return Err(FormError::MissingCost);
    }
    if trimmed.starts_with('-') {
        return Err(FormError::NegativeCost);
    }

    let invalid = || FormError::InvalidCost(text.trim().to_string());

    let canonical: String = trimmed
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let (units, fraction) = canonical.split_once('.').unwrap_or((canonical.as_str(), ""));

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(units) || !all_digits(fraction) || fraction.len() > 2 {
        return Err(invalid());
    }
    if units.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    let units: u64 = if units.is_empty() { 0 } else { units.parse().map_err(|_| invalid())? };
    let fraction: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .map(Cost::from_cents)
        .ok_or_else(invalid)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
