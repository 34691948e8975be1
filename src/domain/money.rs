//! Currency conversion for platforms that quote in minor units.
//!
//! Kalshi reports balances in integer cents. Polymarket already
//! reports major units and never passes through here.

use rust_decimal::Decimal;

/// Convert integer cents into dollars, normalized.
///
/// Trailing zeros are dropped, so `10000` becomes `100` and `50`
/// becomes `0.5`.
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2).normalize()
}

/// Render a dollar amount as `"$<amount>"` using its shortest form.
pub fn format_usd(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}

/// Dollars as a JSON number: the correctly rounded `cents / 100`.
pub fn cents_as_f64(cents: i64) -> f64 {
    cents as f64 / 100.0
}
