//! Numeric helpers for offer amounts and exchange rates
//!
//! Amount coercion follows the lenient "parse the longest numeric prefix"
//! convention that loosely-typed producers rely on: `"12.5 BTC"` is 12.5,
//! `"abc"` is NaN. NaN is not an error; it surfaces later as an `N/A` rate.

use crate::types::{Amount, RATE_NOT_AVAILABLE};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
}

/// Calculate percentage safely for usize values, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use relay_offers::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Parse the longest leading decimal literal of `text`, NaN if there is none
///
/// # Examples
/// ```
/// use relay_offers::utils::math::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("1.5"), 1.5);
/// assert_eq!(parse_float_prefix("  42abc"), 42.0);
/// assert_eq!(parse_float_prefix(".5"), 0.5);
/// assert!(parse_float_prefix("abc").is_nan());
/// ```
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };
    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Zero and NaN count as "no amount"
#[inline]
fn is_present(value: f64) -> bool {
    !(value == 0.0 || value.is_nan())
}

/// Decimal places used to display a rate of this magnitude
///
/// ```
/// use relay_offers::utils::math::rate_precision;
///
/// assert_eq!(rate_precision(65000.0), 2);
/// assert_eq!(rate_precision(150.0), 3);
/// assert_eq!(rate_precision(1.5), 4);
/// assert_eq!(rate_precision(0.00001), 8);
/// ```
pub fn rate_precision(rate: f64) -> usize {
    if rate >= 1000.0 {
        2
    } else if rate >= 100.0 {
        3
    } else if rate < 0.0001 {
        8
    } else {
        4
    }
}

/// Exchange rate `to_amount / from_amount` as a display string
///
/// Returns `N/A` when either amount is unknown, zero or NaN, when
/// `from_amount` is not positive, or when the quotient is not finite.
///
/// # Examples
/// ```
/// use relay_offers::types::Amount;
/// use relay_offers::utils::math::calculate_rate;
///
/// assert_eq!(calculate_rate(Amount::Value(1.0), Amount::Value(65000.0)), "65000.00");
/// assert_eq!(calculate_rate(Amount::Value(0.0), Amount::Value(100.0)), "N/A");
/// assert_eq!(calculate_rate(Amount::Unknown, Amount::Value(100.0)), "N/A");
/// ```
pub fn calculate_rate(from_amount: Amount, to_amount: Amount) -> String {
    let (from, to) = match (from_amount.value(), to_amount.value()) {
        (Some(from), Some(to)) => (from, to),
        _ => return RATE_NOT_AVAILABLE.to_string(),
    };

    if !is_present(from) || !is_present(to) || from <= 0.0 {
        return RATE_NOT_AVAILABLE.to_string();
    }

    let rate = to / from;
    if !rate.is_finite() {
        return RATE_NOT_AVAILABLE.to_string();
    }

    format!("{:.*}", rate_precision(rate), rate)
}
