//! Human-readable currency formatting.

use costplan_shared::types::{Cents, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::arithmetic::{DEFAULT_GST_RATE, ROUNDING, add_gst};

/// Options for [`format_currency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Currency whose symbol prefixes the amount.
    pub currency: Currency,
    /// Print two decimal places; otherwise round to whole units.
    pub show_cents: bool,
    /// Prefix positive amounts with `+`.
    pub show_sign: bool,
    /// Abbreviate thousands, millions and billions (`$1.5M`).
    pub compact: bool,
    /// Gross the amount up by `gst_rate` before formatting.
    pub show_gst: bool,
    /// GST rate applied when `show_gst` is set.
    pub gst_rate: Decimal,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            show_cents: true,
            show_sign: false,
            compact: false,
            show_gst: false,
            gst_rate: DEFAULT_GST_RATE,
        }
    }
}

/// Compact suffixes, largest first, with their size in whole units.
const COMPACT_UNITS: [(u64, &str); 3] = [
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Formats an amount of cents for display.
///
/// # Example
///
/// ```
/// use costplan_core::currency::{FormatOptions, format_currency};
///
/// assert_eq!(format_currency(-123_456, &FormatOptions::default()), "-$1,234.56");
/// ```
#[must_use]
pub fn format_currency(cents: Cents, options: &FormatOptions) -> String {
    let value = if options.show_gst {
        add_gst(cents, options.gst_rate)
    } else {
        cents
    };

    let magnitude = value.unsigned_abs();
    let body = match compact_body(magnitude) {
        Some(body) if options.compact => body,
        _ if options.show_cents => {
            format!("{}.{:02}", group_thousands(magnitude / 100), magnitude % 100)
        }
        _ => group_thousands(magnitude / 100 + u64::from(magnitude % 100 >= 50)),
    };

    let sign = if value < 0 {
        "-"
    } else if options.show_sign && value > 0 {
        "+"
    } else {
        ""
    };

    format!("{sign}{}{body}", options.currency.symbol())
}

/// Abbreviated body for amounts of at least one thousand whole units.
fn compact_body(magnitude: u64) -> Option<String> {
    let units = Decimal::from(magnitude) / Decimal::ONE_HUNDRED;

    for (index, (size, suffix)) in COMPACT_UNITS.iter().enumerate() {
        let size = Decimal::from(*size);
        if units < size {
            continue;
        }

        let scaled = (units / size).round_dp_with_strategy(1, ROUNDING);
        // 999.96K rounds up to 1000K; promote it to 1M.
        if scaled >= Decimal::from(1_000) && index > 0 {
            let (_, bigger) = COMPACT_UNITS[index - 1];
            return Some(format!("1{bigger}"));
        }
        return Some(format!("{}{suffix}", scaled.normalize()));
    }

    None
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
