//! Property-based tests for currency operations.
//!
//! - Format/parse round trip over the supported cent range
//! - GST component consistency
//! - Tolerant equality symmetry

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::arithmetic::{
    DEFAULT_GST_RATE, add_gst, calculate_gst_component, cents_equal, cents_to_dollars,
    dollars_to_cents, remove_gst,
};
use super::format::{FormatOptions, format_currency};
use super::parse::parse_currency_input;
use costplan_shared::types::Currency;

/// Strategy for amounts in the round-trip range (±$100,000.00).
fn round_trip_cents() -> impl Strategy<Value = i64> {
    -10_000_000i64..=10_000_000i64
}

/// Strategy for any supported currency.
fn arb_currency() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::Aud),
        Just(Currency::Nzd),
        Just(Currency::Usd),
        Just(Currency::Gbp),
        Just(Currency::Eur),
    ]
}

/// Strategy for GST rates between 0% and 25% in basis points.
fn arb_gst_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=2_500).prop_map(|bps| Decimal::new(bps, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Formatting with cents and parsing back recovers the exact amount.
    #[test]
    fn prop_format_parse_round_trip(
        cents in round_trip_cents(),
        currency in arb_currency(),
        show_sign in any::<bool>(),
    ) {
        let options = FormatOptions {
            currency,
            show_cents: true,
            show_sign,
            ..FormatOptions::default()
        };
        let text = format_currency(cents, &options);
        prop_assert_eq!(parse_currency_input(&text), cents, "text was {}", text);
    }

    /// Dollars and cents convert exactly in both directions.
    #[test]
    fn prop_cents_dollars_round_trip(cents in any::<i32>()) {
        let cents = i64::from(cents);
        prop_assert_eq!(dollars_to_cents(cents_to_dollars(cents)), cents);
    }

    /// Grossing up adds exactly the GST component.
    #[test]
    fn prop_add_gst_adds_component(
        cents in -1_000_000_000i64..1_000_000_000,
        rate in arb_gst_rate(),
    ) {
        prop_assert_eq!(add_gst(cents, rate) - cents, calculate_gst_component(cents, rate));
    }

    /// Removing GST after adding it is within one cent of the original.
    #[test]
    fn prop_remove_gst_is_approximate_inverse(cents in -1_000_000_000i64..1_000_000_000) {
        let round_trip = remove_gst(add_gst(cents, DEFAULT_GST_RATE), DEFAULT_GST_RATE);
        prop_assert!(cents_equal(round_trip, cents, 1));
    }

    /// Tolerant equality is symmetric.
    #[test]
    fn prop_cents_equal_symmetric(
        a in any::<i32>(),
        b in any::<i32>(),
        tolerance in 0i64..1_000,
    ) {
        let (a, b) = (i64::from(a), i64::from(b));
        prop_assert_eq!(cents_equal(a, b, tolerance), cents_equal(b, a, tolerance));
    }

    /// The parser never panics, whatever the input.
    #[test]
    fn prop_parse_is_total(text in ".{0,40}") {
        let _ = parse_currency_input(&text);
    }
}
