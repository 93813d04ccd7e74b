//! Lenient parsing of user-typed currency amounts.

use std::str::FromStr;

use costplan_shared::types::Cents;
use rust_decimal::Decimal;

use super::arithmetic::dollars_to_cents;

/// Parses free-form currency text into cents.
///
/// Accepts currency symbols and codes, thousands separators, `k`/`m`/`b`
/// magnitude suffixes, a leading minus sign or accounting-style parentheses
/// for negatives. Anything that does not contain a readable number parses
/// to zero; this function never fails.
///
/// # Example
///
/// ```
/// use costplan_core::currency::parse_currency_input;
///
/// assert_eq!(parse_currency_input("$1,234.56"), 123_456);
/// assert_eq!(parse_currency_input("(2.5k)"), -250_000);
/// assert_eq!(parse_currency_input("n/a"), 0);
/// ```
#[must_use]
pub fn parse_currency_input(text: &str) -> Cents {
    let compacted: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .flat_map(char::to_lowercase)
        .collect();

    let (body, parenthesised) = match compacted
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (compacted.as_str(), false),
    };

    let Some(first_digit) = body.find(|c: char| c.is_ascii_digit() || c == '.') else {
        return 0;
    };
    let minus = body[..first_digit].contains('-');

    let number: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let Ok(value) = Decimal::from_str(&number) else {
        return 0;
    };

    let multiplier = magnitude_suffix(body).map_or(Decimal::ONE, Decimal::from);
    let Some(dollars) = value.checked_mul(multiplier) else {
        return 0;
    };

    let cents = dollars_to_cents(dollars);
    if parenthesised || minus {
        cents.saturating_neg()
    } else {
        cents
    }
}

/// Multiplier named by the first letter following the last digit.
fn magnitude_suffix(body: &str) -> Option<u64> {
    let last_digit = body.rfind(|c: char| c.is_ascii_digit() || c == '.')?;
    match body[last_digit..].chars().find(char::is_ascii_alphabetic)? {
        'k' => Some(1_000),
        'm' => Some(1_000_000),
        'b' => Some(1_000_000_000),
        _ => None,
    }
}
