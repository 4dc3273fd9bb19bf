//! Display formatting for offer amounts

use crate::types::{Amount, UNKNOWN_AMOUNT};

/// Render an amount for display, `?` for unknown and `NaN` kept visible
///
/// # Examples
/// ```
/// use relay_offers::types::Amount;
/// use relay_offers::utils::currency::format_amount;
///
/// assert_eq!(format_amount(&Amount::Value(65000.0)), "65000");
/// assert_eq!(format_amount(&Amount::Value(0.25)), "0.25");
/// assert_eq!(format_amount(&Amount::Unknown), "?");
/// ```
pub fn format_amount(amount: &Amount) -> String {
    match amount {
        Amount::Value(v) if v.is_nan() => "NaN".to_string(),
        Amount::Value(v) => format!("{}", v),
        Amount::Unknown => UNKNOWN_AMOUNT.to_string(),
    }
}

/// `"<amount> <asset>"` as shown in offer listings
pub fn format_leg(amount: &Amount, asset: &str) -> String {
    format!("{} {}", format_amount(amount), asset)
}
