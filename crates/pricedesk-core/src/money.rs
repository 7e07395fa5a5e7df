//! # Money Module
//!
//! Decimal helpers for prices and percentages.
//!
//! ## Why Decimal?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In f64:                                                                │
//! │    100.0 * 1.2 = 120.00000000000001                                     │
//! │    round(2.675, 2) = 2.67  (2.675 is stored as 2.67499999...)           │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    dec!(100) * dec!(1.2) = 120.0  (exact, base 10)                      │
//! │    dec!(2.675) rounds to 2.68 with MidpointAwayFromZero                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every arithmetic helper here is checked. Overflow yields `None` and the
//! pricing engine resolves it to zero, so no input can panic the engine.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::DISPLAY_DECIMALS;

/// Rounding rule for every derived field: half away from zero.
///
/// 0.005 → 0.01, -0.005 → -0.01, 0.004 → 0.00.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

const HUNDRED: Decimal = dec!(100);

/// Rounds a value to [`DISPLAY_DECIMALS`] places.
///
/// A result of negative zero is normalized to plain zero so exports never
/// print `-0.00`.
///
/// ## Example
/// ```rust
/// use pricedesk_core::money::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(33.3333)), dec!(33.33));
/// assert_eq!(round_money(dec!(2.675)), dec!(2.68));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(DISPLAY_DECIMALS, ROUNDING);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Strips the decoration people type around numbers.
///
/// Removes whitespace, currency symbols (`£ $ €`), a percent sign and
/// thousands separators, so `"£1,299.00"` becomes `"1299.00"`.
pub fn clean_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '£' | '$' | '€' | '%' | ','))
        .collect()
}

/// Parses a decorated amount. Empty text is `Ok(None)`.
///
/// ## Example
/// ```rust
/// use pricedesk_core::money::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount(" £1,299.50 ").unwrap(), Some(dec!(1299.50)));
/// assert_eq!(parse_amount("12.5%").unwrap(), Some(dec!(12.5)));
/// assert_eq!(parse_amount("").unwrap(), None);
/// assert!(parse_amount("n/a").is_err());
/// ```
pub fn parse_amount(raw: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    let cleaned = clean_amount(raw);
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned.parse::<Decimal>().map(Some)
}

/// Multiplies `amount` by `(1 + rate)`.
///
/// ## Example
/// ```rust
/// use pricedesk_core::money::apply_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(apply_rate(dec!(100), dec!(0.20)), Some(dec!(120)));
/// ```
pub fn apply_rate(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|factor| amount.checked_mul(factor))
}

/// Applies a percentage discount: `amount * (1 - percent / 100)`.
///
/// The percentage is used as given. Values above 100 produce a negative
/// price; values below 0 produce a surcharge.
pub fn apply_percentage_discount(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    percent
        .checked_div(HUNDRED)
        .and_then(|fraction| Decimal::ONE.checked_sub(fraction))
        .and_then(|factor| amount.checked_mul(factor))
}

/// Expresses `part` as a percentage of `whole`.
///
/// Returns zero when `whole` is zero or the division overflows.
///
/// ## Example
/// ```rust
/// use pricedesk_core::money::percentage_of;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percentage_of(dec!(30), dec!(90)).round_dp(2), dec!(33.33));
/// assert_eq!(percentage_of(dec!(5), dec!(0)), dec!(0));
/// ```
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }

    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Formats a value with a currency symbol and two decimals.
///
/// ## Example
/// ```rust
/// use pricedesk_core::money::format_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_money(dec!(1234.5), "£"), "£1234.50");
/// assert_eq!(format_money(dec!(-5.5), "$"), "-$5.50");
/// ```
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let rounded = round_money(value);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!(
        "{}{}{:.prec$}",
        sign,
        symbol,
        rounded.abs(),
        prec = DISPLAY_DECIMALS as usize
    )
}

/// Formats a percentage with two decimals, e.g. `33.33%`.
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.prec$}%",
        round_money(value),
        prec = DISPLAY_DECIMALS as usize
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
