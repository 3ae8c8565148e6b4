//! Parsing and display of monetary amounts.
//!
//! Input amounts may carry comma thousands separators. Output amounts are
//! rounded to cents, grouped by thousands and stripped of trailing zeros.

use crate::core::conversion::ConversionError;

/// Parses amount text after removing every comma.
///
/// Surrounding whitespace is ignored. Infinite and NaN values are rejected.
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let amount = cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidAmountFormat)?;

    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmountFormat);
    }
    Ok(amount)
}

/// Rounds to two decimal places, ties to even on the exact binary value.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Formats an amount as `1,234.5`: rounded to cents, thousands grouped,
/// trailing fractional zeros and a dangling point removed.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{value:.2}");
    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3);
    // -0.001 rounds to "-0.00"; render it as plain zero
    if negative && (integer != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
