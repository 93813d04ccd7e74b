//! Cent conversions and GST math.
//!
//! Rounding is "half up" in the financial sense: midpoints move away from
//! zero, so 0.5 cents becomes 1 cent and -0.5 cents becomes -1 cent.

use costplan_shared::types::Cents;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Rounding strategy used for every cent conversion in the engine.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Australian GST rate (10%).
pub const DEFAULT_GST_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Rounds a decimal amount of cents to a whole number of cents.
///
/// Values outside the `i64` range saturate.
#[must_use]
pub fn decimal_to_cents(value: Decimal) -> Cents {
    value
        .round_dp_with_strategy(0, ROUNDING)
        .to_i64()
        .unwrap_or(if value.is_sign_negative() {
            Cents::MIN
        } else {
            Cents::MAX
        })
}

/// Converts dollars to cents, rounding half up.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use costplan_core::currency::dollars_to_cents;
///
/// assert_eq!(dollars_to_cents(dec!(12.345)), 1235);
/// assert_eq!(dollars_to_cents(dec!(-0.005)), -1);
/// ```
#[must_use]
pub fn dollars_to_cents(dollars: Decimal) -> Cents {
    match dollars.checked_mul(Decimal::ONE_HUNDRED) {
        Some(cents) => decimal_to_cents(cents),
        None if dollars.is_sign_negative() => Cents::MIN,
        None => Cents::MAX,
    }
}

/// Converts cents to an exact dollar amount.
#[must_use]
pub fn cents_to_dollars(cents: Cents) -> Decimal {
    Decimal::new(cents, 2)
}

/// GST payable on a GST-exclusive amount.
#[must_use]
pub fn calculate_gst_component(cents: Cents, gst_rate: Decimal) -> Cents {
    decimal_to_cents(Decimal::from(cents) * gst_rate)
}

/// Grosses a GST-exclusive amount up to GST-inclusive.
///
/// `add_gst(x, r) - x == calculate_gst_component(x, r)` holds exactly.
#[must_use]
pub fn add_gst(cents: Cents, gst_rate: Decimal) -> Cents {
    cents.saturating_add(calculate_gst_component(cents, gst_rate))
}

/// Strips GST from a GST-inclusive amount.
///
/// Approximate inverse of [`add_gst`]: both directions round to whole cents,
/// so `remove_gst(add_gst(x))` may differ from `x` by a cent.
#[must_use]
pub fn remove_gst(cents: Cents, gst_rate: Decimal) -> Cents {
    Decimal::from(cents)
        .checked_div(Decimal::ONE + gst_rate)
        .map_or(cents, decimal_to_cents)
}

/// Equality within `tolerance` cents, used to absorb rounding drift.
#[must_use]
pub fn cents_equal(a: Cents, b: Cents, tolerance: Cents) -> bool {
    a.abs_diff(b) <= tolerance.unsigned_abs()
}

/// Percentage of `budget` consumed by `actual`, to two decimal places.
///
/// A zero budget reports 100 when anything has been spent, otherwise 0.
#[must_use]
pub fn budget_used_percent(actual: Cents, budget: Cents) -> Decimal {
    if budget == 0 {
        return if actual > 0 {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }

    (Decimal::from(actual) * Decimal::ONE_HUNDRED / Decimal::from(budget))
        .round_dp_with_strategy(2, ROUNDING)
}
