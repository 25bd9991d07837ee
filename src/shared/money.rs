//! Price presentation helpers
//!
//! Totals are accumulated as raw `f64` and only rounded when shown.

/// Round to two decimal places, half away from zero.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount with exactly two decimals.
pub fn format_price(amount: f64) -> String {
    format!("{:.2}", round_to_cents(amount))
}
